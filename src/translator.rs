use crate::entity::Block;
use crate::entity::Span;
use crate::entity::SpanSeq;

pub fn translate(blocks: Vec<Block>) -> String {
    blocks
        .into_iter()
        .map(translate_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn translate_block(block: Block) -> String {
    match block {
        Block::Heading(level, text) => format!("<h{}>{}</h{}>", level, text, level),
        Block::Codeblock(language, content) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            language, content
        ),
        Block::List(items) => format!(
            "<ul>{}</ul>",
            items
                .into_iter()
                .map(|item| format!("<li>{}</li>", translate_spans(item)))
                .collect::<String>()
        ),
        Block::Paragraph(lines) => lines
            .into_iter()
            .map(|line| format!("<p>{}</p>", translate_spans(line)))
            .collect(),
    }
}

fn translate_spans(line: SpanSeq) -> String {
    line.into_iter()
        .map(|span| match span {
            Span::Plaintext(s) => s,
            Span::Bold(s) => format!("<strong>{}</strong>", s),
            Span::InlineCode(s) => format!("<code>{}</code>", s),
        })
        .collect()
}
