//! Snapshot codec for the indent stack.
//!
//! A snapshot is a flat run of fixed-size little-endian records, bottom of
//! the stack first, with no header: the record count is the byte length
//! divided by the record size. Records that do not fit in the output buffer
//! are dropped whole, so a truncated snapshot still restores to a
//! well-formed prefix of the original stack.

use crate::config::RecordLayout;
use crate::indent::{IndentContext, IndentStack};

/// Write `stack` into `buffer` and return the number of bytes written.
pub fn serialize(stack: &IndentStack, layout: RecordLayout, buffer: &mut [u8]) -> usize {
    let record_size = layout.record_size();
    let count = stack.depth().min(buffer.len() / record_size);

    for (level, record) in stack
        .levels()
        .iter()
        .take(count)
        .zip(buffer.chunks_exact_mut(record_size))
    {
        record[..4].copy_from_slice(&level.width.to_le_bytes());
        if layout == RecordLayout::WidthAndContext {
            record[4..8].copy_from_slice(&level.context.tag().to_le_bytes());
        }
    }

    count * record_size
}

/// Rebuild a stack from a snapshot.
///
/// Empty input gives a fresh stack. Trailing bytes shorter than a record are
/// ignored. A leading zero-width record is taken as the sentinel, and reading
/// stops at the first record that is not wider than the level below it.
pub fn deserialize(bytes: &[u8], layout: RecordLayout) -> IndentStack {
    let mut stack = IndentStack::new();

    for (index, record) in bytes.chunks_exact(layout.record_size()).enumerate() {
        let width = read_u32(&record[..4]);
        if index == 0 && width == 0 {
            continue;
        }
        let context = match layout {
            RecordLayout::WidthOnly => IndentContext::Normal,
            RecordLayout::WidthAndContext => IndentContext::from_tag(read_u32(&record[4..8])),
        };
        if !stack.push(width, context) {
            break;
        }
    }

    stack
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    u32::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SERIALIZATION_BUFFER_SIZE;
    use crate::indent::IndentDescriptor;
    use pretty_assertions::assert_eq;

    fn stack_of(levels: &[(u32, IndentContext)]) -> IndentStack {
        let mut stack = IndentStack::new();
        for &(width, context) in levels {
            assert!(stack.push(width, context));
        }
        stack
    }

    fn nested(depth: u32) -> IndentStack {
        let mut stack = IndentStack::new();
        for level in 1..=depth {
            let context = if level % 3 == 0 {
                IndentContext::ListItem
            } else {
                IndentContext::Normal
            };
            stack.push(level * 2, context);
        }
        stack
    }

    #[test]
    fn test_sentinel_only() {
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let len = serialize(&IndentStack::new(), RecordLayout::WidthAndContext, &mut buffer);
        assert_eq!(len, 8);
        assert_eq!(&buffer[..8], &[0u8; 8]);
        assert_eq!(deserialize(&buffer[..len], RecordLayout::WidthAndContext), IndentStack::new());
    }

    #[test]
    fn test_record_bytes() {
        let stack = stack_of(&[(2, IndentContext::ListItem)]);
        let mut buffer = [0xffu8; 16];
        let len = serialize(&stack, RecordLayout::WidthAndContext, &mut buffer);
        assert_eq!(len, 16);
        assert_eq!(buffer, [0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_width_only_records() {
        let stack = stack_of(&[(2, IndentContext::ListItem), (300, IndentContext::Normal)]);
        let mut buffer = [0u8; 64];
        let len = serialize(&stack, RecordLayout::WidthOnly, &mut buffer);
        assert_eq!(len, 12);
        assert_eq!(&buffer[..12], &[0, 0, 0, 0, 2, 0, 0, 0, 44, 1, 0, 0]);

        let restored = deserialize(&buffer[..len], RecordLayout::WidthOnly);
        assert_eq!(restored.widths(), vec![0, 2, 300]);
        assert!(restored
            .levels()
            .iter()
            .all(|level| level.context == IndentContext::Normal));
    }

    #[test]
    fn test_round_trip_keeps_contexts() {
        let stack = stack_of(&[
            (2, IndentContext::Normal),
            (4, IndentContext::ListItem),
            (7, IndentContext::Normal),
        ]);
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let len = serialize(&stack, RecordLayout::WidthAndContext, &mut buffer);
        assert_eq!(deserialize(&buffer[..len], RecordLayout::WidthAndContext), stack);
    }

    #[test]
    fn test_round_trip_at_full_capacity() {
        // 128 records of 8 bytes fill the buffer exactly.
        let stack = nested(127);
        assert_eq!(stack.depth(), 128);
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let len = serialize(&stack, RecordLayout::WidthAndContext, &mut buffer);
        assert_eq!(len, SERIALIZATION_BUFFER_SIZE);
        assert_eq!(deserialize(&buffer[..len], RecordLayout::WidthAndContext), stack);
    }

    #[test]
    fn test_truncates_to_whole_records() {
        let stack = nested(10);
        let mut buffer = [0u8; 29];
        let len = serialize(&stack, RecordLayout::WidthAndContext, &mut buffer);
        assert_eq!(len, 24);

        let restored = deserialize(&buffer[..len], RecordLayout::WidthAndContext);
        assert_eq!(restored.levels(), &stack.levels()[..3]);
    }

    #[test]
    fn test_buffer_smaller_than_one_record() {
        let mut buffer = [0u8; 3];
        assert_eq!(serialize(&nested(2), RecordLayout::WidthOnly, &mut buffer), 0);
    }

    #[test]
    fn test_empty_input_resets() {
        assert_eq!(deserialize(&[], RecordLayout::WidthAndContext), IndentStack::new());
    }

    #[test]
    fn test_trailing_partial_record_ignored() {
        let stack = stack_of(&[(4, IndentContext::Normal)]);
        let mut buffer = [0u8; 32];
        let len = serialize(&stack, RecordLayout::WidthAndContext, &mut buffer);
        let restored = deserialize(&buffer[..len + 5], RecordLayout::WidthAndContext);
        assert_eq!(restored, stack);
    }

    #[test]
    fn test_partial_record_only_gives_sentinel() {
        assert_eq!(deserialize(&[1, 2, 3], RecordLayout::WidthOnly), IndentStack::new());
    }

    #[test]
    fn test_sentinel_not_duplicated() {
        let bytes = [0u8; 8];
        let restored = deserialize(&bytes, RecordLayout::WidthOnly);
        assert_eq!(restored.levels(), &[IndentDescriptor::SENTINEL]);
    }

    #[test]
    fn test_non_increasing_record_stops_restore() {
        let mut bytes = Vec::new();
        for width in [0u32, 4, 2, 8] {
            bytes.extend_from_slice(&width.to_le_bytes());
        }
        assert_eq!(deserialize(&bytes, RecordLayout::WidthOnly).widths(), vec![0, 4]);
    }

    #[test]
    fn test_missing_sentinel_is_supplied() {
        let bytes = 6u32.to_le_bytes();
        assert_eq!(deserialize(&bytes, RecordLayout::WidthOnly).widths(), vec![0, 6]);
    }

    #[test]
    fn test_unknown_context_tag_decodes_as_normal() {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&9u32.to_le_bytes());
        let restored = deserialize(&bytes, RecordLayout::WidthAndContext);
        assert_eq!(restored.top(), IndentDescriptor::new(2, IndentContext::Normal));
    }
}
