//! HTML rendering of shell views.
//!
//! Labels, hrefs and titles are escaped; page content is inserted verbatim
//! because it is the host's own markup.

use crate::panel::NavPanel;
use crate::shell::{PanelSlot, ShellView};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a full shell view: panel region plus inset content.
pub fn render_page(view: &ShellView) -> String {
    let mut out = String::new();
    match view {
        ShellView::Loading {
            placeholder,
            content,
        } => {
            out.push_str("<div class=\"nav-shell\" data-state=\"loading\">");
            out.push_str(&format!(
                "<div class=\"sidebar-loading\">{}</div>",
                escape(&placeholder.message)
            ));
            push_inset(&mut out, content.as_str());
        }
        ShellView::Ready {
            role,
            panel,
            content,
        } => {
            out.push_str(&format!(
                "<div class=\"nav-shell\" data-state=\"ready\" data-role=\"{}\">",
                escape(role.as_str())
            ));
            match panel {
                PanelSlot::Panel(panel) => out.push_str(&render_panel(panel)),
                PanelSlot::Fallback(fallback) => out.push_str(&format!(
                    "<div class=\"sidebar-error\" role=\"alert\">{}</div>",
                    escape(&fallback.message)
                )),
            }
            push_inset(&mut out, content.as_str());
        }
    }
    out.push_str("</div>");
    out
}

/// Render only the side panel.
pub fn render_panel(panel: &NavPanel) -> String {
    let mut out = format!(
        "<aside class=\"sidebar\" data-side=\"left\" data-collapsible=\"{}\">",
        panel.collapsible.as_str()
    );

    out.push_str(&format!(
        "<header class=\"sidebar-header\"><span class=\"sidebar-title\">{}</span>\
         <button type=\"button\" class=\"sidebar-trigger\" aria-label=\"Toggle Sidebar\">\
         </button></header>",
        escape(&panel.header.title)
    ));

    out.push_str("<nav class=\"sidebar-content\"><ul class=\"sidebar-menu\">");
    for entry in &panel.entries {
        let current = if entry.active {
            " aria-current=\"page\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<li class=\"sidebar-menu-item\"><a href=\"{}\" data-active=\"{}\"{}>\
             <i class=\"icon\" data-icon=\"{}\"></i><span>{}</span></a></li>",
            escape(&entry.href),
            entry.active,
            current,
            entry.icon.name(),
            escape(&entry.label)
        ));
    }
    out.push_str("</ul></nav>");

    out.push_str("<hr class=\"sidebar-separator\">");
    out.push_str(&format!(
        "<footer class=\"sidebar-footer\">{}</footer>",
        escape(&panel.footer.text)
    ));
    out.push_str("</aside>");
    out
}

fn push_inset(out: &mut String, content: &str) {
    out.push_str("<main class=\"sidebar-inset\">");
    out.push_str(content);
    out.push_str("</main>");
}
