/*!
 * Line reflow for reassembled cues.
 *
 * Translation usually hands a folded cue back as one long line; the wrap
 * collaborator restores a readable two-line layout when the cleaner asks
 * for it.
 */

/// Reflow collaborator used when a translated cue needs its line
/// structure back
pub trait AutoWrap: Send + Sync {
    /// Break `text` into lines no wider than `target_width` characters
    fn wrap(&self, text: &str, target_width: usize) -> String;
}

/// Breaks at the space nearest the midpoint, keeping both lines balanced
#[derive(Debug, Default)]
pub struct BalancedWrapper;

impl AutoWrap for BalancedWrapper {
    fn wrap(&self, text: &str, target_width: usize) -> String {
        // Re-flow from a clean single line
        let folded: String = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let chars: Vec<char> = folded.chars().collect();
        if chars.len() <= target_width.max(1) {
            return folded;
        }

        let midpoint = chars.len() / 2;

        // Space nearest the midpoint wins, scanning outward in both
        // directions
        let mut split_at = None;
        for offset in 0..=midpoint {
            let right = midpoint + offset;
            if right < chars.len() && chars[right] == ' ' {
                split_at = Some(right);
                break;
            }
            let left = midpoint.saturating_sub(offset);
            if left > 0 && chars[left] == ' ' {
                split_at = Some(left);
                break;
            }
        }

        match split_at {
            Some(pos) => {
                let first: String = chars[..pos].iter().collect();
                let second: String = chars[pos + 1..].iter().collect();
                format!("{}\n{}", first.trim_end(), second.trim_start())
            }
            // Nothing to break at (one long word, or text without spaces):
            // split at the midpoint character boundary
            None => {
                let first: String = chars[..midpoint].iter().collect();
                let second: String = chars[midpoint..].iter().collect();
                format!("{}\n{}", first, second)
            }
        }
    }
}
