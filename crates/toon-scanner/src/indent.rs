//! Indent stack: the nesting state owned by one scanner instance.

/// Whether the line that opened a level started with a list-item marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentContext {
    #[default]
    Normal,
    ListItem,
}

impl IndentContext {
    /// Wire tag used by the snapshot codec.
    pub fn tag(self) -> u32 {
        match self {
            IndentContext::Normal => 0,
            IndentContext::ListItem => 1,
        }
    }

    /// Unknown tags decode as `Normal`.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            1 => IndentContext::ListItem,
            _ => IndentContext::Normal,
        }
    }
}

/// One open nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentDescriptor {
    pub width: u32,
    pub context: IndentContext,
}

impl IndentDescriptor {
    /// The top-level level every stack starts with.
    pub const SENTINEL: IndentDescriptor = IndentDescriptor {
        width: 0,
        context: IndentContext::Normal,
    };

    pub fn new(width: u32, context: IndentContext) -> Self {
        Self { width, context }
    }
}

/// Ordered record of open levels, bottom to top.
///
/// Never empty: the bottom element is always [`IndentDescriptor::SENTINEL`],
/// and widths strictly increase towards the top. All mutation goes through
/// [`IndentStack::push`] and [`IndentStack::pop`], which keep both properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    levels: Vec<IndentDescriptor>,
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentStack {
    pub fn new() -> Self {
        Self {
            levels: vec![IndentDescriptor::SENTINEL],
        }
    }

    pub fn top(&self) -> IndentDescriptor {
        // levels[0] is the sentinel and is never removed.
        self.levels[self.levels.len() - 1]
    }

    /// Number of levels including the sentinel.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// True when only the sentinel remains.
    pub fn is_top_level(&self) -> bool {
        self.levels.len() == 1
    }

    /// Open a new level. Refused (returns `false`) unless `width` is
    /// strictly greater than the current top.
    pub fn push(&mut self, width: u32, context: IndentContext) -> bool {
        if width <= self.top().width {
            return false;
        }
        self.levels.push(IndentDescriptor::new(width, context));
        true
    }

    /// Close the top level. The sentinel is never popped.
    pub fn pop(&mut self) -> Option<IndentDescriptor> {
        if self.is_top_level() {
            return None;
        }
        self.levels.pop()
    }

    pub fn levels(&self) -> &[IndentDescriptor] {
        &self.levels
    }

    pub fn widths(&self) -> Vec<u32> {
        self.levels.iter().map(|level| level.width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_stack_holds_only_sentinel() {
        let stack = IndentStack::new();
        assert_eq!(stack.levels(), &[IndentDescriptor::SENTINEL]);
        assert!(stack.is_top_level());
    }

    #[test]
    fn test_push_requires_strictly_greater_width() {
        let mut stack = IndentStack::new();
        assert!(stack.push(2, IndentContext::Normal));
        assert!(!stack.push(2, IndentContext::Normal));
        assert!(!stack.push(1, IndentContext::ListItem));
        assert!(stack.push(4, IndentContext::ListItem));
        assert_eq!(stack.widths(), vec![0, 2, 4]);
        assert_eq!(stack.top().context, IndentContext::ListItem);
    }

    #[test]
    fn test_pop_never_removes_sentinel() {
        let mut stack = IndentStack::new();
        stack.push(2, IndentContext::Normal);
        assert_eq!(stack.pop(), Some(IndentDescriptor::new(2, IndentContext::Normal)));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), IndentDescriptor::SENTINEL);
    }

    #[test]
    fn test_context_tags() {
        assert_eq!(IndentContext::Normal.tag(), 0);
        assert_eq!(IndentContext::ListItem.tag(), 1);
        assert_eq!(IndentContext::from_tag(1), IndentContext::ListItem);
        assert_eq!(IndentContext::from_tag(7), IndentContext::Normal);
    }
}
