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

//! Static prompt template catalog.

use crate::model::Prompt;

pub const PROMPT_CATEGORIES: [&str; 8] = [
    "Writing",
    "Analysis",
    "Coding",
    "Learning",
    "Brainstorming",
    "Productivity",
    "Creative",
    "Technical",
];

/// Prompts shown per category when browsing without a query.
pub const BROWSE_PER_CATEGORY: usize = 3;

pub const PROMPT_LIBRARY: &[Prompt] = &[
    Prompt {
        id: "write-email",
        title: "Write Professional Email",
        description: "Draft a professional email",
        category: "Writing",
        content: "Help me write a professional email to ",
    },
    Prompt {
        id: "write-summary",
        title: "Summarize Text",
        description: "Create a concise summary",
        category: "Writing",
        content: "Please summarize the following text in 3-4 sentences: ",
    },
    Prompt {
        id: "write-outline",
        title: "Create Outline",
        description: "Generate a structured outline",
        category: "Writing",
        content: "Create a detailed outline for an article about ",
    },
    Prompt {
        id: "write-blog",
        title: "Write Blog Post",
        description: "Draft a blog post",
        category: "Writing",
        content: "Write a blog post about ",
    },
    Prompt {
        id: "analyze-data",
        title: "Analyze Data",
        description: "Interpret and analyze data",
        category: "Analysis",
        content: "Analyze this data and provide insights: ",
    },
    Prompt {
        id: "compare-options",
        title: "Compare Options",
        description: "Compare different choices",
        category: "Analysis",
        content: "Compare the pros and cons of ",
    },
    Prompt {
        id: "explain-concept",
        title: "Explain Concept",
        description: "Break down a complex idea",
        category: "Analysis",
        content: "Explain the concept of ",
    },
    Prompt {
        id: "code-review",
        title: "Code Review",
        description: "Review and improve code",
        category: "Coding",
        content: "Review this code and suggest improvements: ",
    },
    Prompt {
        id: "debug-code",
        title: "Debug Code",
        description: "Help fix code issues",
        category: "Coding",
        content: "Help me debug this code: ",
    },
    Prompt {
        id: "explain-code",
        title: "Explain Code",
        description: "Explain what code does",
        category: "Coding",
        content: "Explain what this code does: ",
    },
    Prompt {
        id: "generate-code",
        title: "Generate Code",
        description: "Write code for a task",
        category: "Coding",
        content: "Write code to ",
    },
    Prompt {
        id: "learn-topic",
        title: "Learn Topic",
        description: "Teach me about a topic",
        category: "Learning",
        content: "Teach me about ",
    },
    Prompt {
        id: "study-guide",
        title: "Study Guide",
        description: "Create a study guide",
        category: "Learning",
        content: "Create a study guide for ",
    },
    Prompt {
        id: "practice-questions",
        title: "Practice Questions",
        description: "Generate practice questions",
        category: "Learning",
        content: "Generate 5 practice questions about ",
    },
    Prompt {
        id: "brainstorm-ideas",
        title: "Brainstorm Ideas",
        description: "Generate creative ideas",
        category: "Brainstorming",
        content: "Brainstorm 10 creative ideas for ",
    },
    Prompt {
        id: "problem-solving",
        title: "Problem Solving",
        description: "Find solutions to problems",
        category: "Brainstorming",
        content: "Help me solve this problem: ",
    },
    Prompt {
        id: "plan-project",
        title: "Plan Project",
        description: "Create a project plan",
        category: "Productivity",
        content: "Help me plan a project for ",
    },
    Prompt {
        id: "time-management",
        title: "Time Management",
        description: "Get productivity tips",
        category: "Productivity",
        content: "Give me tips for managing time when ",
    },
    Prompt {
        id: "write-story",
        title: "Write Story",
        description: "Create a creative story",
        category: "Creative",
        content: "Write a short story about ",
    },
    Prompt {
        id: "generate-ideas",
        title: "Generate Ideas",
        description: "Spark creative inspiration",
        category: "Creative",
        content: "Generate creative ideas for ",
    },
    Prompt {
        id: "tech-help",
        title: "Technical Help",
        description: "Get technical assistance",
        category: "Technical",
        content: "Help me with this technical issue: ",
    },
    Prompt {
        id: "setup-guide",
        title: "Setup Guide",
        description: "Step-by-step setup instructions",
        category: "Technical",
        content: "Give me step-by-step instructions to set up ",
    },
];

/// Prompts whose title, description or category contains `query`
/// (case-insensitive). Blank queries match nothing.
pub fn search_prompts(query: &str) -> Vec<&'static Prompt> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let q = query.to_lowercase();
    PROMPT_LIBRARY
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&q)
                || p.description.to_lowercase().contains(&q)
                || p.category.to_lowercase().contains(&q)
        })
        .collect()
}

pub fn prompts_by_category(category: &str) -> Vec<&'static Prompt> {
    PROMPT_LIBRARY.iter().filter(|p| p.category == category).collect()
}

/// Category sections for the empty-query picker: each category with its
/// first [`BROWSE_PER_CATEGORY`] prompts.
pub fn browse_prompts() -> Vec<(&'static str, Vec<&'static Prompt>)> {
    PROMPT_CATEGORIES
        .iter()
        .map(|category| {
            let mut prompts = prompts_by_category(category);
            prompts.truncate(BROWSE_PER_CATEGORY);
            (*category, prompts)
        })
        .filter(|(_, prompts)| !prompts.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn catalog_shape() {
        assert_eq!(PROMPT_LIBRARY.len(), 22);
        let ids: HashSet<&str> = PROMPT_LIBRARY.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROMPT_LIBRARY.len());
        assert!(PROMPT_LIBRARY.iter().all(|p| PROMPT_CATEGORIES.contains(&p.category)));
    }

    #[test]
    fn search_matches_title_description_or_category() {
        let by_title: Vec<&str> = search_prompts("debug").iter().map(|p| p.id).collect();
        assert_eq!(by_title, vec!["debug-code"]);

        let by_category = search_prompts("CODING");
        assert_eq!(by_category.len(), 4);

        let by_description: Vec<&str> =
            search_prompts("inspiration").iter().map(|p| p.id).collect();
        assert_eq!(by_description, vec!["generate-ideas"]);
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(search_prompts("  ").is_empty());
    }

    #[test]
    fn category_lookup_is_exact() {
        assert_eq!(prompts_by_category("Writing").len(), 4);
        assert!(prompts_by_category("writing").is_empty());
    }

    #[test]
    fn browse_caps_each_category() {
        let sections = browse_prompts();
        assert_eq!(sections.len(), PROMPT_CATEGORIES.len());
        assert_eq!(sections[0].0, "Writing");
        assert_eq!(sections[0].1.len(), BROWSE_PER_CATEGORY);
        // Productivity only has two prompts.
        let productivity = sections.iter().find(|(c, _)| *c == "Productivity").unwrap();
        assert_eq!(productivity.1.len(), 2);
    }
}
