pub type SpanSeq = Vec<Span>;

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading(usize, String),
    List(Vec<SpanSeq>),
    Paragraph(Vec<SpanSeq>),
    Codeblock(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Span {
    Plaintext(String),
    Bold(String),
    InlineCode(String),
}
