//! 16x2 LCD helpers: sliding-window scroll for messages wider than one row.

/// Visible width of the LCD in characters.
pub const LCD_WIDTH: usize = 16;

/// Frames to show for one message. Short messages fit in a single frame;
/// longer ones get padded with a blank row's worth of spaces and scrolled
/// one character at a time so the tail clears the display.
pub fn lcd_windows(msg: &str) -> Vec<String> {
    let chars: Vec<char> = msg.chars().collect();
    if chars.len() <= LCD_WIDTH {
        return vec![msg.to_string()];
    }
    let mut padded = chars;
    padded.extend(std::iter::repeat(' ').take(LCD_WIDTH));
    padded
        .windows(LCD_WIDTH)
        .map(|w| w.iter().collect())
        .collect()
}

/// Expand a wire command into the lines actually sent. `CMD:LCD=` payloads
/// wider than the display are scrolled; everything else passes through.
pub fn expand_command(cmd: &str) -> Vec<String> {
    let Some(payload) = cmd.strip_prefix("CMD:LCD=") else {
        return vec![cmd.to_string()];
    };
    lcd_windows(payload)
        .into_iter()
        .map(|frame| format!("CMD:LCD={frame}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_one_frame() {
        assert_eq!(lcd_windows("hello"), vec!["hello"]);
        assert_eq!(lcd_windows("exactly sixteen!"), vec!["exactly sixteen!"]);
    }

    #[test]
    fn long_message_scrolls_one_char_at_a_time() {
        let frames = lcd_windows("hello wonderful world");
        // 21 chars + 16 pad = 37; 37 - 16 + 1 windows
        assert_eq!(frames.len(), 22);
        assert_eq!(frames[0], "hello wonderful ");
        assert_eq!(frames[1], "ello wonderful w");
        // last frame is all padding: the message has scrolled off
        assert_eq!(frames.last().map(String::as_str), Some("                "));
        assert!(frames.iter().all(|f| f.chars().count() == LCD_WIDTH));
    }

    #[test]
    fn only_lcd_commands_expand() {
        assert_eq!(expand_command("CMD:LED=ON"), vec!["CMD:LED=ON"]);
        assert_eq!(expand_command("CMD:LCD=hi"), vec!["CMD:LCD=hi"]);
        let frames = expand_command("CMD:LCD=mood set to happy vibes");
        assert!(frames.len() > 1);
        assert!(frames.iter().all(|f| f.starts_with("CMD:LCD=")));
    }
}
