//! Markdown rendering collaborators.

use comrak::{Options, markdown_to_html};

/// Turns a processed markdown body into its published form.
pub trait Renderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// HTML renderer backed by comrak with GitHub-flavoured extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer;

impl Renderer for ComrakRenderer {
    fn render(&self, source: &str) -> String {
        markdown_to_html(source, &default_options())
    }
}

/// Leaves the body untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, source: &str) -> String {
        source.to_string()
    }
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, source: &str) -> String {
        self(source)
    }
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;

    options.parse.smart = false;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true; // raw HTML blocks in content are intentional

    options
}
