//! Caret placement decision table.
//!
//! After insertion the caret must land at the absolute end of the real
//! content. Which Range operation achieves that depends on what the last
//! content paragraph ends with; the mapping is kept as an explicit table so
//! the DOM layer carries no nested placement branches. The trailing blank
//! markers are never candidates: the caret belongs to content, not to the
//! typing room below it.

/// Shape of the last content paragraph's final child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastLineNode {
    /// Final child is a text node of this UTF-16 length.
    Text { utf16_len: usize },
    /// Final child is a non-text node (e.g. a line-break marker).
    Element,
    /// The paragraph has no children.
    Empty,
}

/// Where to collapse the selection after insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPlacement {
    /// Both selection endpoints at this UTF-16 offset inside the final
    /// text node.
    TextEnd { offset: usize },
    /// Select the last paragraph's contents and collapse to the end.
    LineEnd,
    /// No content paragraph exists: select the editor's contents and
    /// collapse to the end.
    EditorEnd,
}

/// Decide caret placement from the last content paragraph's shape.
///
/// `None` means no paragraph was appended at all, which the insertion
/// protocol handles defensively even though every payload produces at
/// least one line.
pub fn caret_placement(last_line: Option<LastLineNode>) -> CaretPlacement {
    match last_line {
        Some(LastLineNode::Text { utf16_len }) => CaretPlacement::TextEnd { offset: utf16_len },
        Some(LastLineNode::Element) | Some(LastLineNode::Empty) => CaretPlacement::LineEnd,
        None => CaretPlacement::EditorEnd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_tail_places_at_text_end() {
        assert_eq!(
            caret_placement(Some(LastLineNode::Text { utf16_len: 7 })),
            CaretPlacement::TextEnd { offset: 7 }
        );
    }

    #[test]
    fn test_marker_tail_collapses_over_line() {
        assert_eq!(
            caret_placement(Some(LastLineNode::Element)),
            CaretPlacement::LineEnd
        );
        assert_eq!(
            caret_placement(Some(LastLineNode::Empty)),
            CaretPlacement::LineEnd
        );
    }

    #[test]
    fn test_no_paragraph_collapses_over_editor() {
        assert_eq!(caret_placement(None), CaretPlacement::EditorEnd);
    }
}
