//! URL Templates
//!
//! Author-supplied templates carry an `{{ action }}` slot and a
//! `{{ dimensions }}` slot. Thumbnails fill dimensions with the width
//! only; the other actions use the slash-delimited `width/height` form.

use vario_dom::Action;

/// Render a request URL from an element's template.
pub fn render_url(template: &str, action: Action, width: u32, height: u32) -> String {
    let url = template.replacen("{{ action }}", action.as_str(), 1);
    let dimensions = match action {
        Action::Thumbnail => width.to_string(),
        Action::Resize | Action::Matte => format!("{width}/{height}"),
    };
    url.replacen("{{ dimensions }}", &dimensions, 1)
}
