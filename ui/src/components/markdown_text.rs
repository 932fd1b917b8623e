//! Markdown written by users: notice boards, contract descriptions and
//! discussion replies.

use pulldown_cmark::{Event, Options, Parser, html};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub text: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component]
pub fn MarkdownText(props: &Props) -> Html {
    let content = render_markdown(&props.text);

    let classes = classes!(
        "prose",
        "prose-neutral",
        "dark:prose-invert",
        "prose-sm",
        "max-w-none",
        "prose-p:my-2",
        "prose-ul:my-2",
        "prose-ol:my-2",
        props.class.clone()
    );

    html! {
        <div class={classes}>
            { Html::from_html_unchecked(content.into()) }
        </div>
    }
}

/// Markdown to HTML. Raw HTML in the source is escaped and shown as text.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_markdown() {
        let out = render_markdown("Office **closed** on Friday");
        assert_eq!(out, "<p>Office <strong>closed</strong> on Friday</p>\n");
    }

    #[test]
    fn raw_html_is_escaped() {
        let out = render_markdown("hi <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }
}
