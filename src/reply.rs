// artichat — A terminal chat demo with inline artifacts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Synthetic assistant replies and the character stream that plays them out.

use futures::Stream;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Delay between streamed characters.
pub const CHAR_DELAY: Duration = Duration::from_millis(30);

/// Canned reply for `prompt`: a JavaScript code block followed by a markdown
/// block, so every answer carries two artifacts.
pub fn synthetic_reply(prompt: &str) -> String {
    let escaped = prompt.replace('`', "\\`");
    let code = [
        "function respond(input) {".to_owned(),
        "  // Echoes the input and returns a greeting".to_owned(),
        "  return `Hello, ${input}!`".to_owned(),
        "}".to_owned(),
        String::new(),
        format!("console.log(respond(\"{escaped}\"));"),
    ]
    .join("\n");
    let notes = [
        "# Quick Notes".to_owned(),
        String::new(),
        format!("- **Topic**: Response preview for `{prompt}`"),
        "- You can expand this block to view it in a larger panel.".to_owned(),
        String::new(),
        "## Next Steps".to_owned(),
        "1. Edit the function.".to_owned(),
        "2. Re-run the sample.".to_owned(),
        "3. Share results.".to_owned(),
    ]
    .join("\n");
    format!(
        "Here's a small code sample based on your message:\n\n```js\n{code}\n```\n\n\
         And here's a markdown preview you can expand:\n\n```markdown\n{notes}\n```\n"
    )
}

/// Yields the characters of `text` one at a time, `delay` apart. Ends early,
/// between characters, once `cancel` fires.
pub fn reply_stream(
    text: String,
    delay: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = char> + Send + 'static {
    let chars: Vec<char> = text.chars().collect();
    futures::stream::unfold((chars, 0usize, cancel), move |(chars, next, cancel)| async move {
        let ch = *chars.get(next)?;
        if cancel.is_cancelled() {
            return None;
        }
        if !delay.is_zero() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return None,
                () = tokio::time::sleep(delay) => {}
            }
        }
        Some((ch, (chars, next + 1, cancel)))
    })
}
