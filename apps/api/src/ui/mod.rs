//! Server-rendered page chrome: shared stylesheet, sidebar layout, progress
//! bar, loading and output panes. Content fragments are built by handlers;
//! anything user-controlled goes through [`escape`] before it gets here.

use std::fmt::Write as _;

use crate::forms::escape;

const STYLE: &str = r#"<style>
body { font-family: 'Segoe UI', Tahoma, sans-serif; background:#f6f8fa; color:#222; margin:0; padding:0; display: flex; }
.sidebar { width: 240px; background: #2c3e50; color: #ecf0f1; padding: 20px; height: 100vh; position: fixed; }
.sidebar h2 { color: #ecf0f1; border: none; }
.sidebar a { color: #ecf0f1; text-decoration: none; display: block; padding: 10px 15px; border-radius: 4px; margin-bottom: 8px; }
.sidebar a:hover { background-color: #34495e; }
.main-content { margin-left: 280px; padding: 20px; width: calc(100% - 280px); }
.container { max-width:1000px; margin:12px auto; background:#fff; padding:28px; border-radius:12px; box-shadow:0 6px 24px rgba(0,0,0,0.08); }
h1 { color:#1a73e8; margin:0 0 10px 0; text-align:center; }
h2 { color:#333; margin-top:18px; border-bottom:1px solid #eee; padding-bottom:8px }
.form-grid { display:grid; grid-template-columns:1fr 1fr; gap:16px; }
@media(max-width:800px){ .form-grid{grid-template-columns:1fr} }
label { display:block; font-weight:600; margin-top:10px; }
input, select, textarea { width:100%; padding:10px; margin-top:6px; border-radius:8px; border:1px solid #d1d7e0; font-size:15px; }
textarea { min-height:110px; resize: vertical; }
.checkbox-group, .radio-group { margin-top:8px; }
button { background:#1a73e8; color:#fff; padding:12px 18px; border-radius:8px; border:none; cursor:pointer; margin-top:18px; font-weight:700; }
button:hover { background: #155ab3; }
.progress { display:flex; gap:12px; margin-bottom:18px; justify-content:space-between; }
.step { flex:1; text-align:center; color:#a2abb8; font-weight:700; position:relative; padding:8px 6px; }
.step.active { color:#1a73e8; }
.loader { border:4px solid #f3f3f3; border-top:4px solid #1a73e8; border-radius:50%; width:44px; height:44px; animation:spin 1s linear infinite; margin:28px auto; }
@keyframes spin { 0%{transform:rotate(0)}100%{transform:rotate(360deg)} }
.rfp-output { background:#fafbfd; padding:18px; border-radius:10px; white-space:pre-wrap; line-height:1.5; font-family:ui-monospace, SFMono-Regular, Menlo, Monaco, "Roboto Mono", "Courier New", monospace; }
.download { display:inline-block; margin-top:18px; margin-right:8px; background:#22a66b; color:#fff; padding:10px 16px; border-radius:8px; text-decoration:none; }
.download:hover { background: #20945d; }
.notice { margin-top:12px; color:#666; font-size:14px }
.initiative-list { list-style-type: none; padding: 0; }
.initiative-list li { background: #fdfdfd; border: 1px solid #eee; padding: 15px; margin-bottom: 10px; border-radius: 8px; display: flex; justify-content: space-between; align-items: center; }
.initiative-list .info strong { color: #1a73e8; }
.initiative-list .actions a { margin-left: 10px; font-size: 14px; }
</style>"#;

const PROGRESS_STEPS: [&str; 3] = ["1. Basic Info", "2. Details & Scoring", "3. Generate RFP"];

/// Wraps a content fragment in the full page shell (head, stylesheet,
/// sidebar navigation). `content` is trusted markup built by handlers.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{}</title>{STYLE}</head><body>
<div class="sidebar"><h2>RFP Assistant</h2><nav><a href="/">New Vendor Request</a><a href="/initiatives">List Initiatives</a></nav></div>
<main class="main-content">{content}</main></body></html>"#,
        escape(title)
    )
}

pub fn container(inner: &str) -> String {
    format!(r#"<div class="container">{inner}</div>"#)
}

/// Three-step progress bar; steps up to and including `step` are active.
pub fn progress(step: usize) -> String {
    let mut html = String::from(r#"<div class="progress">"#);
    for (i, label) in PROGRESS_STEPS.iter().enumerate() {
        let class = if i + 1 <= step { "step active" } else { "step" };
        let _ = write!(html, r#"<div class="{class}">{label}</div>"#);
    }
    html.push_str("</div>");
    html
}

/// Loading panel with a timed client-side redirect to the result endpoint.
/// `redirect_url` is an internal route, not user input.
pub fn loading(title: &str, message: &str, redirect_url: &str) -> String {
    let mut html = String::new();
    let _ = write!(html, "<h1>{}</h1>", escape(title));
    html.push_str(r#"<div class="loader"></div>"#);
    if !message.is_empty() {
        let _ = write!(html, r#"<p class="notice">{}</p>"#, escape(message));
    }
    let _ = write!(
        html,
        r#"<script>setTimeout(function(){{ window.location.href = '{redirect_url}'; }}, 800);</script>"#
    );
    container(&html)
}

/// Monospace, pre-wrapped pane for generated text. Escapes its input.
pub fn output_pane(text: &str) -> String {
    format!(r#"<div class="rfp-output">{}</div>"#, escape(text))
}

pub fn download_link(href: &str, label: &str) -> String {
    format!(
        r#"<a class="download" href="{}">{}</a>"#,
        escape(href),
        escape(label)
    )
}

pub fn error_panel(title: &str, message: &str) -> String {
    container(&format!(
        r#"<h1>{}</h1><p class="notice">{}</p><p><a href="/initiatives">Back to All Initiatives</a></p>"#,
        escape(title),
        escape(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_activates_steps_up_to_current() {
        let html = progress(2);
        assert_eq!(html.matches("step active").count(), 2);
        assert_eq!(html.matches(r#"class="step""#).count(), 1);
    }

    #[test]
    fn test_page_escapes_title() {
        let html = page("<Edit> & Co", "body");
        assert!(html.contains("<title>&lt;Edit&gt; &amp; Co</title>"));
    }

    #[test]
    fn test_output_pane_escapes_content() {
        let html = output_pane("<script>x</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
