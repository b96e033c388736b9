pub mod seaorm;

pub use seaorm::SeaOrmRecordStore;
