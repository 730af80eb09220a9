use crate::Field;

/// Parallel field and prefix stacks describing the position of the current
/// node in the compared graph.
///
/// A frame is pushed for every composite field entered (`field` set) and for
/// every collection element or map entry entered (`prefix` set). Frames are
/// only pushed through the walker's `descend`, which pops them again once the
/// nested comparison returns, whatever its outcome.
#[derive(Debug, Default)]
pub(crate) struct PathContext {
    fields: Vec<Option<&'static Field>>,
    prefixes: Vec<Option<String>>,
}

impl PathContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Dotted path of the current node, with `name` appended when given.
    pub(crate) fn full_name(&self, name: Option<&str>) -> String {
        let mut out = String::new();
        let parts = self
            .fields
            .iter()
            .zip(&self.prefixes)
            .flat_map(|(field, prefix)| [field.map(Field::name), prefix.as_deref()])
            .chain([name])
            .flatten()
            .filter(|part| !part.is_empty());
        for part in parts {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(part);
        }
        out
    }

    /// Innermost composite field entered so far.
    pub(crate) fn innermost_field(&self) -> Option<&'static Field> {
        self.fields.iter().rev().find_map(|field| *field)
    }

    pub(crate) fn depth(&self) -> usize {
        debug_assert_eq!(self.fields.len(), self.prefixes.len());
        self.fields.len()
    }

    pub(super) fn push(&mut self, field: Option<&'static Field>, prefix: Option<String>) {
        self.fields.push(field);
        self.prefixes.push(prefix);
    }

    pub(super) fn pop(&mut self) {
        self.fields.pop();
        self.prefixes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static POSITIONS: Field = Field::new("positions", "Vec");
    static BOOKS: Field = Field::new("bookToProducts", "HashMap");

    #[test]
    fn empty_context_yields_name_or_empty() {
        let path = PathContext::new();
        assert_eq!(path.full_name(None), "");
        assert_eq!(path.full_name(Some("book")), "book");
    }

    #[test]
    fn fields_and_prefixes_interleave() {
        let mut path = PathContext::new();
        path.push(Some(&POSITIONS), None);
        path.push(None, Some("4".into()));
        path.push(Some(&BOOKS), None);
        path.push(None, Some("EQ".into()));
        assert_eq!(path.full_name(None), "positions.4.bookToProducts.EQ");
        assert_eq!(path.full_name(Some("qty")), "positions.4.bookToProducts.EQ.qty");
        for _ in 0..4 {
            path.pop();
        }
        assert_eq!(path.depth(), 0);
    }

    #[test]
    fn innermost_field_skips_prefix_frames() {
        let mut path = PathContext::new();
        path.push(Some(&POSITIONS), None);
        path.push(None, Some("0".into()));
        assert_eq!(path.innermost_field().map(Field::name), Some("positions"));
        assert_eq!(path.full_name(Some("Position")), "positions.0.Position");
    }

    #[test]
    fn empty_prefix_tokens_are_skipped() {
        let mut path = PathContext::new();
        path.push(None, Some(String::new()));
        assert_eq!(path.full_name(Some("a")), "a");
    }
}
