use std::io::Write;

use serde::{Deserialize, Serialize};

use super::errors::RenderError;

pub const DEFAULT_NAV_TEMPLATE: &str = "partials/pagination.html";

/// Data handed to the navigation template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNav {
    pub page: u64,
    pub pages: u64,
    pub route: String,
}

impl PageNav {
    pub fn has_previous(&self) -> bool { self.page > 1 }

    pub fn has_next(&self) -> bool { self.page < self.pages }

    /// Link to page `n` of the route: fills the `:page` (or `{page}`) segment,
    /// or appends `/n` when the route has none.
    pub fn link(&self, n: u64) -> String {
        let path = self.route.split('?').next().unwrap_or_default();
        let mut replaced = false;
        let segments: Vec<String> = path
            .split('/')
            .map(|seg| {
                if !replaced && (seg == ":page" || seg == "{page}") {
                    replaced = true;
                    n.to_string()
                } else {
                    seg.to_string()
                }
            })
            .collect();
        if replaced {
            return segments.join("/");
        }
        format!("{}/{}", path.trim_end_matches('/'), n)
    }
}

/// Template engine seam: turns a template id and a [`PageNav`] into bytes
/// appended to the response body.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, nav: &PageNav, out: &mut Vec<u8>) -> Result<(), RenderError>;
}

/// Writes the data bag as a JSON object, whatever the template id.
#[derive(Clone, Debug, Default)]
pub struct JsonViewRenderer;

#[derive(Serialize)]
struct JsonView<'a> {
    template: &'a str,
    page: u64,
    pages: u64,
    route: &'a str,
}

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, template: &str, nav: &PageNav, out: &mut Vec<u8>) -> Result<(), RenderError> {
        let view = JsonView { template, page: nav.page, pages: nav.pages, route: &nav.route };
        serde_json::to_writer(out, &view)?;
        Ok(())
    }
}

/// Bootstrap-style `<ul class="pagination">` widget, registered under one template id.
#[derive(Clone, Debug)]
pub struct HtmlNavRenderer {
    template: String,
}

impl HtmlNavRenderer {
    pub fn new(template: impl Into<String>) -> Self { Self { template: template.into() } }
}

impl Default for HtmlNavRenderer {
    fn default() -> Self { Self::new(DEFAULT_NAV_TEMPLATE) }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

fn item(out: &mut Vec<u8>, class: &str, href: &str, label: &str) -> std::io::Result<()> {
    writeln!(
        out,
        r#"<li class="page-item{class}"><a class="page-link" href="{}">{label}</a></li>"#,
        escape_attr(href)
    )
}

impl ViewRenderer for HtmlNavRenderer {
    fn render(&self, template: &str, nav: &PageNav, out: &mut Vec<u8>) -> Result<(), RenderError> {
        if template != self.template {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }
        if nav.pages == 0 {
            writeln!(out, r#"<ul class="pagination"></ul>"#)?;
            return Ok(());
        }
        writeln!(out, r#"<ul class="pagination">"#)?;
        let prev_class = if nav.has_previous() { "" } else { " disabled" };
        item(out, prev_class, &nav.link(nav.page.saturating_sub(1).max(1)), "&laquo;")?;
        for n in 1..=nav.pages {
            let class = if n == nav.page { " active" } else { "" };
            item(out, class, &nav.link(n), &n.to_string())?;
        }
        let next_class = if nav.has_next() { "" } else { " disabled" };
        item(out, next_class, &nav.link(nav.page.saturating_add(1).min(nav.pages)), "&raquo;")?;
        writeln!(out, "</ul>")?;
        Ok(())
    }
}
