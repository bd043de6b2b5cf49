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

//! Message markup: block parsing, inline emphasis, artifacts and match
//! highlighting. Everything here is pure and independent of the terminal.

pub mod artifact;
pub mod blocks;
pub mod highlight;
pub mod inline;

pub use artifact::{Artifact, ArtifactKind, ArtifactLine, ArtifactView};
pub use blocks::{RenderBlock, parse_blocks};
pub use highlight::{Highlight, highlight};
pub use inline::{EmphasisMode, MarkupSpan, parse_markup};
