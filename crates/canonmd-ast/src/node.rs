//! Node kinds of the document tree.

/// Book division opened by a [`NodeKind::DocumentMatter`] marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Matter {
    /// `{frontmatter}`
    Front,
    /// `{mainmatter}`
    Main,
    /// `{backmatter}`
    Back,
}

/// An index entry such as `(!item, subitem)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Primary entries are written as `(!!item)`.
    pub primary: bool,
    /// Main index term.
    pub item: String,
    /// Optional sub-term.
    pub subitem: Option<String>,
}

/// Kind of a document tree node, together with its literal payload.
///
/// The set is closed: every consumer matches exhaustively, so adding a kind
/// is a compile error everywhere a decision has to be made about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of every tree.
    Document,
    Title,
    Bibliography,
    BibliographyItem,
    DocumentIndex,
    IndexLetter,
    IndexItem,
    IndexSubItem,
    IndexLink,
    /// Plain text, written verbatim.
    Text(String),
    Softbreak,
    Hardbreak,
    /// Callout marker, `<<...>>`.
    Callout,
    Emph,
    Strong,
    Del,
    Citation(String),
    DocumentMatter(Matter),
    Heading {
        /// Heading level, 1 through 6.
        level: u8,
    },
    HorizontalRule,
    Paragraph,
    HtmlSpan(String),
    HtmlBlock(String),
    List {
        /// Whether the list is numbered.
        ordered: bool,
    },
    ListItem {
        /// Ordering flag of the list this item belongs to.
        ordered: bool,
    },
    CodeBlock {
        info: String,
        literal: String,
    },
    Caption,
    CaptionFigure,
    Table,
    TableCell,
    TableHeader,
    TableBody,
    TableRow,
    TableFooter,
    BlockQuote,
    Aside,
    CrossReference(String),
    Index(IndexEntry),
    Link {
        destination: String,
        title: String,
    },
    Math(String),
    Image {
        destination: String,
        title: String,
    },
    /// Inline code span, written between backticks.
    Code(String),
    MathBlock(String),
    Subscript,
    Superscript,
}

impl NodeKind {
    /// Whether the node is visited on both enter and exit.
    ///
    /// Leaves are visited once, on enter, and never have children.
    #[must_use]
    pub fn is_container(&self) -> bool {
        !matches!(
            self,
            Self::Text(_)
                | Self::Code(_)
                | Self::Softbreak
                | Self::Hardbreak
                | Self::HorizontalRule
                | Self::HtmlSpan(_)
                | Self::HtmlBlock(_)
                | Self::CodeBlock { .. }
                | Self::Math(_)
                | Self::MathBlock(_)
                | Self::Index(_)
                | Self::Citation(_)
        )
    }

    /// Stable name of the kind, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Title => "title",
            Self::Bibliography => "bibliography",
            Self::BibliographyItem => "bibliography item",
            Self::DocumentIndex => "document index",
            Self::IndexLetter => "index letter",
            Self::IndexItem => "index item",
            Self::IndexSubItem => "index subitem",
            Self::IndexLink => "index link",
            Self::Text(_) => "text",
            Self::Softbreak => "softbreak",
            Self::Hardbreak => "hardbreak",
            Self::Callout => "callout",
            Self::Emph => "emphasis",
            Self::Strong => "strong",
            Self::Del => "strikethrough",
            Self::Citation(_) => "citation",
            Self::DocumentMatter(_) => "document matter",
            Self::Heading { .. } => "heading",
            Self::HorizontalRule => "horizontal rule",
            Self::Paragraph => "paragraph",
            Self::HtmlSpan(_) => "html span",
            Self::HtmlBlock(_) => "html block",
            Self::List { .. } => "list",
            Self::ListItem { .. } => "list item",
            Self::CodeBlock { .. } => "code block",
            Self::Caption => "caption",
            Self::CaptionFigure => "caption figure",
            Self::Table => "table",
            Self::TableCell => "table cell",
            Self::TableHeader => "table header",
            Self::TableBody => "table body",
            Self::TableRow => "table row",
            Self::TableFooter => "table footer",
            Self::BlockQuote => "blockquote",
            Self::Aside => "aside",
            Self::CrossReference(_) => "cross reference",
            Self::Index(_) => "index",
            Self::Link { .. } => "link",
            Self::Math(_) => "math",
            Self::Image { .. } => "image",
            Self::Code(_) => "code",
            Self::MathBlock(_) => "math block",
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
        }
    }

    /// Mutable access to the literal of kinds that accumulate raw text
    /// (code blocks, HTML blocks, display math).
    pub(crate) fn literal_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::CodeBlock { literal, .. } | Self::HtmlBlock(literal) | Self::MathBlock(literal) => {
                Some(literal)
            }
            _ => None,
        }
    }
}
