//! DSA question bank and the level-based selection policy.
//!
//! The bank is immutable; selection copies entries into a session and never
//! reorders or randomizes them.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Basic,
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaQuestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub topic: String,
    pub time_limit_minutes: u32,
    pub expected_complexity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_output: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

/// Seniority bucket derived from a free-text job level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobLevel {
    Junior,
    Mid,
    Senior,
}

impl JobLevel {
    /// Case-insensitive substring classification; anything unrecognised is `Mid`.
    pub fn classify(level: &str) -> Self {
        let level = level.to_lowercase();
        if level.contains("senior") || level.contains("lead") {
            JobLevel::Senior
        } else if level.contains("junior") || level.contains("entry") {
            JobLevel::Junior
        } else {
            JobLevel::Mid
        }
    }

    /// How many questions of each difficulty the level draws, in draw order.
    fn quota(self) -> &'static [(Difficulty, usize)] {
        match self {
            JobLevel::Senior => &[(Difficulty::Easy, 2), (Difficulty::Medium, 1)],
            JobLevel::Junior => &[(Difficulty::Easy, 2), (Difficulty::Basic, 1)],
            JobLevel::Mid => &[(Difficulty::Easy, 1), (Difficulty::Medium, 1)],
        }
    }
}

/// Number of catalog entries used when a level's quota matches nothing.
const FALLBACK_SELECTION: usize = 3;

/// Selects the DSA questions for a job level from the built-in bank.
pub fn select_for_level(level: &str) -> Vec<DsaQuestion> {
    select_from(bank(), JobLevel::classify(level))
}

/// Takes the first N entries per difficulty in catalog order. An empty result
/// falls back to the first three entries of the catalog.
pub fn select_from(catalog: &[DsaQuestion], level: JobLevel) -> Vec<DsaQuestion> {
    let selected: Vec<DsaQuestion> = level
        .quota()
        .iter()
        .flat_map(|&(difficulty, count)| {
            catalog
                .iter()
                .filter(move |q| q.difficulty == difficulty)
                .take(count)
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        catalog.iter().take(FALLBACK_SELECTION).cloned().collect()
    } else {
        selected
    }
}

struct Entry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    topic: &'static str,
    minutes: u32,
    complexity: &'static str,
    sample: (&'static str, &'static str),
    constraints: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "two-sum",
        title: "Two Sum",
        description: "Given an array of integers nums and an integer target, return indices of \
            the two numbers such that they add up to target. Each input has exactly one \
            solution, and the same element may not be used twice.",
        difficulty: Difficulty::Easy,
        topic: "Array, Hash Table",
        minutes: 15,
        complexity: "O(n) time, O(n) space",
        sample: ("nums = [2,7,11,15], target = 9", "[0,1]"),
        constraints: &[
            "2 <= nums.length <= 10^4",
            "-10^9 <= nums[i] <= 10^9",
            "Only one valid answer exists",
        ],
    },
    Entry {
        id: "reverse-linked-list",
        title: "Reverse Linked List",
        description: "Given the head of a singly linked list, reverse the list, and return the \
            reversed list.",
        difficulty: Difficulty::Easy,
        topic: "Linked List, Recursion",
        minutes: 20,
        complexity: "O(n) time, O(1) space",
        sample: ("head = [1,2,3,4,5]", "[5,4,3,2,1]"),
        constraints: &[
            "The number of nodes in the list is in the range [0, 5000]",
            "-5000 <= Node.val <= 5000",
        ],
    },
    Entry {
        id: "valid-parentheses",
        title: "Valid Parentheses",
        description: "Given a string s containing just the characters '(', ')', '{', '}', '[' \
            and ']', determine if the input string is valid: open brackets must be closed by \
            the same type of bracket, in the correct order.",
        difficulty: Difficulty::Easy,
        topic: "String, Stack",
        minutes: 15,
        complexity: "O(n) time, O(n) space",
        sample: ("s = \"()[]{}\"", "true"),
        constraints: &["1 <= s.length <= 10^4", "s consists of parentheses only '()[]{}'"],
    },
    Entry {
        id: "binary-tree-inorder",
        title: "Binary Tree Inorder Traversal",
        description: "Given the root of a binary tree, return the inorder traversal of its \
            nodes' values.",
        difficulty: Difficulty::Easy,
        topic: "Tree, Stack, Recursion",
        minutes: 20,
        complexity: "O(n) time, O(n) space",
        sample: ("root = [1,null,2,3]", "[1,3,2]"),
        constraints: &[
            "The number of nodes in the tree is in the range [0, 100]",
            "-100 <= Node.val <= 100",
        ],
    },
    Entry {
        id: "longest-substring",
        title: "Longest Substring Without Repeating Characters",
        description: "Given a string s, find the length of the longest substring without \
            repeating characters.",
        difficulty: Difficulty::Medium,
        topic: "String, Sliding Window, Hash Table",
        minutes: 25,
        complexity: "O(n) time, O(min(m,n)) space",
        sample: ("s = \"abcabcbb\"", "3"),
        constraints: &[
            "0 <= s.length <= 5 * 10^4",
            "s consists of English letters, digits, symbols and spaces",
        ],
    },
    Entry {
        id: "merge-intervals",
        title: "Merge Intervals",
        description: "Given an array of intervals where intervals[i] = [start, end], merge all \
            overlapping intervals and return the non-overlapping intervals that cover the input.",
        difficulty: Difficulty::Medium,
        topic: "Array, Sorting",
        minutes: 30,
        complexity: "O(n log n) time, O(1) space",
        sample: ("intervals = [[1,3],[2,6],[8,10],[15,18]]", "[[1,6],[8,10],[15,18]]"),
        constraints: &[
            "1 <= intervals.length <= 10^4",
            "intervals[i].length == 2",
            "0 <= start <= end <= 10^4",
        ],
    },
    Entry {
        id: "lru-cache",
        title: "LRU Cache",
        description: "Design a data structure that follows the constraints of a Least Recently \
            Used (LRU) cache, with get(key) and put(key, value) operations.",
        difficulty: Difficulty::Medium,
        topic: "Hash Table, Linked List, Design",
        minutes: 35,
        complexity: "O(1) time for both operations",
        sample: (
            "LRUCache(2); put(1,1); put(2,2); get(1); put(3,3); get(2); put(4,4); get(1); get(3); get(4)",
            "null, null, null, 1, null, -1, null, -1, 3, 4",
        ),
        constraints: &["1 <= capacity <= 3000", "0 <= key <= 10^4", "0 <= value <= 10^5"],
    },
    Entry {
        id: "word-ladder",
        title: "Word Ladder",
        description: "Given beginWord, endWord and a dictionary wordList, return the length of \
            the shortest transformation sequence from beginWord to endWord where every \
            adjacent pair of words differs by a single letter.",
        difficulty: Difficulty::Hard,
        topic: "Hash Table, String, BFS",
        minutes: 45,
        complexity: "O(M^2 × N) time, O(M^2 × N) space",
        sample: (
            "beginWord = \"hit\", endWord = \"cog\", wordList = [\"hot\",\"dot\",\"dog\",\"lot\",\"log\",\"cog\"]",
            "5",
        ),
        constraints: &[
            "1 <= beginWord.length <= 10",
            "endWord.length == beginWord.length",
            "1 <= wordList.length <= 5000",
        ],
    },
    Entry {
        id: "fizz-buzz",
        title: "Fizz Buzz",
        description: "Print the numbers from 1 to n, but print \"Fizz\" for multiples of three, \
            \"Buzz\" for multiples of five and \"FizzBuzz\" for multiples of both.",
        difficulty: Difficulty::Basic,
        topic: "Conditional Statements",
        minutes: 10,
        complexity: "O(n) time, O(1) space",
        sample: (
            "n = 15",
            "1, 2, Fizz, 4, Buzz, Fizz, 7, 8, Fizz, Buzz, 11, Fizz, 13, 14, FizzBuzz",
        ),
        constraints: &["1 <= n <= 10^4"],
    },
    Entry {
        id: "palindrome-check",
        title: "Palindrome Check",
        description: "Given a string, determine if it is a palindrome, considering only \
            alphanumeric characters and ignoring case.",
        difficulty: Difficulty::Basic,
        topic: "String Manipulation",
        minutes: 10,
        complexity: "O(n) time, O(1) space",
        sample: ("s = \"A man, a plan, a canal: Panama\"", "true"),
        constraints: &["1 <= s.length <= 10^5"],
    },
    Entry {
        id: "factorial",
        title: "Factorial",
        description: "Write a function that calculates the factorial of a non-negative integer.",
        difficulty: Difficulty::Basic,
        topic: "Recursion",
        minutes: 10,
        complexity: "O(n) time, O(1) space",
        sample: ("n = 5", "120"),
        constraints: &["0 <= n <= 12"],
    },
];

/// The built-in question bank, in declaration order.
pub fn bank() -> &'static [DsaQuestion] {
    static BANK: OnceLock<Vec<DsaQuestion>> = OnceLock::new();
    BANK.get_or_init(|| {
        ENTRIES
            .iter()
            .map(|e| DsaQuestion {
                id: e.id.to_string(),
                title: e.title.to_string(),
                description: e.description.to_string(),
                difficulty: e.difficulty,
                topic: e.topic.to_string(),
                time_limit_minutes: e.minutes,
                expected_complexity: e.complexity.to_string(),
                sample_input: Some(e.sample.0.to_string()),
                sample_output: Some(e.sample.1.to_string()),
                constraints: e.constraints.iter().map(|c| c.to_string()).collect(),
            })
            .collect()
    })
}

/// "<min>-<max> minutes per problem" over the given questions.
pub fn time_budget_label(questions: &[DsaQuestion]) -> String {
    let min = questions.iter().map(|q| q.time_limit_minutes).min();
    let max = questions.iter().map(|q| q.time_limit_minutes).max();
    match (min, max) {
        (Some(min), Some(max)) if min == max => format!("{min} minutes per problem"),
        (Some(min), Some(max)) => format!("{min}-{max} minutes per problem"),
        _ => "15-45 minutes per problem".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn difficulties(questions: &[DsaQuestion]) -> Vec<Difficulty> {
        questions.iter().map(|q| q.difficulty).collect()
    }

    #[test]
    fn test_bank_ids_are_unique() {
        let mut ids: Vec<&str> = bank().iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), bank().len());
    }

    #[test]
    fn test_classify_levels() {
        assert_eq!(JobLevel::classify("Senior Frontend Developer"), JobLevel::Senior);
        assert_eq!(JobLevel::classify("Tech LEAD"), JobLevel::Senior);
        assert_eq!(JobLevel::classify("junior analyst"), JobLevel::Junior);
        assert_eq!(JobLevel::classify("Entry level"), JobLevel::Junior);
        assert_eq!(JobLevel::classify("Mid-Level"), JobLevel::Mid);
        assert_eq!(JobLevel::classify(""), JobLevel::Mid);
    }

    #[test]
    fn test_senior_selection_is_easy_easy_medium() {
        let selected = select_for_level("Senior Frontend Developer");
        assert_eq!(
            difficulties(&selected),
            vec![Difficulty::Easy, Difficulty::Easy, Difficulty::Medium]
        );
        let ids: Vec<&str> = selected.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["two-sum", "reverse-linked-list", "longest-substring"]);
    }

    #[test]
    fn test_junior_selection_is_easy_easy_basic() {
        let selected = select_for_level("Junior Developer");
        assert_eq!(
            difficulties(&selected),
            vec![Difficulty::Easy, Difficulty::Easy, Difficulty::Basic]
        );
        assert_eq!(selected[2].id, "fizz-buzz");
    }

    #[test]
    fn test_default_selection_is_easy_medium() {
        let selected = select_for_level("Mid-Level");
        assert_eq!(
            difficulties(&selected),
            vec![Difficulty::Easy, Difficulty::Medium]
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        assert_eq!(select_for_level("Senior"), select_for_level("Senior"));
        assert_eq!(select_for_level("whatever"), select_for_level("whatever"));
    }

    #[test]
    fn test_empty_quota_falls_back_to_first_three_entries() {
        let hard_only: Vec<DsaQuestion> = bank()
            .iter()
            .filter(|q| q.difficulty == Difficulty::Hard)
            .cloned()
            .chain(bank().iter().filter(|q| q.difficulty == Difficulty::Hard).cloned())
            .chain(bank().iter().filter(|q| q.difficulty == Difficulty::Hard).cloned())
            .collect();
        let selected = select_from(&hard_only, JobLevel::Mid);
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|q| q.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_selection_does_not_mutate_bank() {
        let before = bank().len();
        let _ = select_for_level("Senior");
        assert_eq!(bank().len(), before);
    }

    #[test]
    fn test_time_budget_label() {
        let selected = select_for_level("Senior");
        assert_eq!(time_budget_label(&selected), "15-25 minutes per problem");
        assert_eq!(time_budget_label(&[]), "15-45 minutes per problem");
    }
}
