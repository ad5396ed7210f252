//! Comment removal ahead of tokenization.

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Removes every `<!-- ... -->` region from `input`.
///
/// Comments do not nest: the first `-->` after an opening marker closes it,
/// and it may not share characters with that marker. An unterminated comment
/// swallows the rest of the input.
pub fn strip_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some((before, comment)) = rest.split_once(COMMENT_OPEN) {
        output.push_str(before);
        match comment.split_once(COMMENT_CLOSE) {
            Some((_, after)) => rest = after,
            None => return output,
        }
    }

    output.push_str(rest);
    output
}
