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

use ratatui::style::Color;

// Accent
pub const RUST_ORANGE: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";
pub const SEPARATOR_CHAR: &str = "─";
pub const SELECT_MARKER: &str = " ▸ ";

// Role header colors
pub const ROLE_USER: Color = Color::White;
pub const ROLE_ASSISTANT: Color = RUST_ORANGE;

// User message background
pub const USER_MSG_BG: Color = Color::Rgb(40, 44, 52);

// Artifacts
pub const ARTIFACT_BORDER: Color = Color::Rgb(90, 96, 110);
pub const CODE_FG: Color = Color::Rgb(152, 195, 121);
pub const INLINE_CODE_FG: Color = Color::Rgb(229, 192, 123);
pub const HEADING_FG: Color = Color::Rgb(97, 175, 239);

// Notices
pub const NOTICE_INFO: Color = Color::Cyan;
pub const NOTICE_ERROR: Color = Color::Red;

pub const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];
