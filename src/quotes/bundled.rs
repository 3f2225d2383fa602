use chrono::{Datelike, NaiveDate};

use super::RemoteQuote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledQuote {
    pub id: &'static str,
    pub content: &'static str,
    pub author: &'static str,
}

impl From<&BundledQuote> for RemoteQuote {
    fn from(q: &BundledQuote) -> Self {
        RemoteQuote {
            id: q.id.to_string(),
            content: q.content.to_string(),
            author: q.author.to_string(),
        }
    }
}

pub const BUNDLED_QUOTES: &[BundledQuote] = &[
    BundledQuote {
        id: "bundled-01",
        content: "The journey of a thousand miles begins with one step.",
        author: "Lao Tzu",
    },
    BundledQuote {
        id: "bundled-02",
        content: "It does not matter how slowly you go as long as you do not stop.",
        author: "Confucius",
    },
    BundledQuote {
        id: "bundled-03",
        content: "We are what we repeatedly do. Excellence, then, is not an act, but a habit.",
        author: "Will Durant",
    },
    BundledQuote {
        id: "bundled-04",
        content: "Very little is needed to make a happy life; it is all within yourself, in your way of thinking.",
        author: "Marcus Aurelius",
    },
    BundledQuote {
        id: "bundled-05",
        content: "He who has a why to live can bear almost any how.",
        author: "Friedrich Nietzsche",
    },
    BundledQuote {
        id: "bundled-06",
        content: "Happiness depends upon ourselves.",
        author: "Aristotle",
    },
    BundledQuote {
        id: "bundled-07",
        content: "Nothing is permanent except change.",
        author: "Heraclitus",
    },
    BundledQuote {
        id: "bundled-08",
        content: "What you do today can improve all your tomorrows.",
        author: "Ralph Marston",
    },
    BundledQuote {
        id: "bundled-09",
        content: "Keep your face always toward the sunshine, and shadows will fall behind you.",
        author: "Walt Whitman",
    },
    BundledQuote {
        id: "bundled-10",
        content: "The best way out is always through.",
        author: "Robert Frost",
    },
    BundledQuote {
        id: "bundled-11",
        content: "Act as if what you do makes a difference. It does.",
        author: "William James",
    },
    BundledQuote {
        id: "bundled-12",
        content: "Believe you can and you're halfway there.",
        author: "Theodore Roosevelt",
    },
    BundledQuote {
        id: "bundled-13",
        content: "We suffer more often in imagination than in reality.",
        author: "Seneca",
    },
    BundledQuote {
        id: "bundled-14",
        content: "Well done is better than well said.",
        author: "Benjamin Franklin",
    },
];

/// Deterministic pick: the same date always yields the same quote and
/// consecutive dates walk through the collection.
pub fn pick_for_date(date: NaiveDate) -> &'static BundledQuote {
    let len = BUNDLED_QUOTES.len() as i64;
    let index = i64::from(date.num_days_from_ce()).rem_euclid(len) as usize;
    &BUNDLED_QUOTES[index]
}
