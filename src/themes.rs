//! Theme registry and keyword matching
//!
//! A theme is a named set of inclusion and exclusion keywords matched against
//! an item's title and summary. The musical mode is not keyword based: it
//! uses curated per-show tables instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved id for the curated musical mode
pub const MUSICAL_ID: &str = "musical";

/// Description shown for the musical mode in theme listings
pub const MUSICAL_DESCRIPTION: &str = "Musical episodes (Buffy, Scrubs, Sunny, etc.)";

// =============================================================================
// Built-in Themes
// =============================================================================

struct ThemeDef {
    id: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    exclude: &'static [&'static str],
}

const BUILTIN_THEMES: &[ThemeDef] = &[
    ThemeDef {
        id: "christmas",
        description: "Christmas and holiday episodes",
        keywords: &[
            "christmas", "xmas", "santa", "santa's", "scrooge", "nutcracker",
            "krampus", "yuletide", "rudolph", "grinch", "north pole",
            "christmas eve", "christmas tree", "jingle", "frosty the snowman",
            "mistletoe", "eggnog",
        ],
        exclude: &[
            "halloween", "thanksgiving", "easter", "valentine", "hanukkah",
            "kwanzaa", "columbus day", "independence day", "4th of july",
            "new year", "labor day", "memorial day",
        ],
    },
    ThemeDef {
        id: "halloween",
        description: "Halloween and spooky episodes",
        keywords: &[
            "halloween", "spooky", "haunted", "ghost", "witch", "vampire",
            "zombie", "monster", "trick or treat", "costume", "pumpkin",
            "scary", "horror", "nightmare",
        ],
        exclude: &["christmas", "thanksgiving"],
    },
    ThemeDef {
        id: "thanksgiving",
        description: "Thanksgiving episodes",
        keywords: &["thanksgiving", "turkey day", "pilgrim", "giving thanks"],
        exclude: &["christmas"],
    },
    ThemeDef {
        id: "newyears",
        description: "New Year's Eve/Day episodes",
        keywords: &[
            "new year", "new year's", "nye", "december 31", "january 1",
            "midnight countdown", "ball drop", "auld lang syne",
        ],
        exclude: &["chinese new year", "lunar new year"],
    },
    ThemeDef {
        id: "hanukkah",
        description: "Hanukkah episodes and movies",
        keywords: &[
            "hanukkah", "chanukah", "hanukah", "channukah", "menorah",
            "dreidel", "latkes", "maccabee", "festival of lights",
            "eight crazy nights",
        ],
        exclude: &[],
    },
    ThemeDef {
        id: "valentine",
        description: "Valentine's Day episodes",
        keywords: &[
            "valentine", "valentines", "valentine's day", "cupid",
            "romantic", "love day",
        ],
        exclude: &[],
    },
    ThemeDef {
        id: "july4th",
        description: "4th of July / Independence Day episodes",
        keywords: &[
            "4th of july", "fourth of july", "july fourth", "july 4th",
            "independence day", "fireworks",
        ],
        exclude: &["christmas", "halloween", "thanksgiving", "alien", "war of the worlds"],
    },
];

// =============================================================================
// Musical Tables
// =============================================================================

/// Shows with specific musical episodes, keyed by exact show title.
/// Values are episode-title fragments, matched case-insensitively.
pub const MUSICAL_EPISODES: &[(&str, &[&str])] = &[
    ("Buffy the Vampire Slayer", &["Once More, with Feeling"]),
    ("Scrubs", &["My Musical"]),
    ("Community", &["Regional Holiday Music"]),
    ("Psych", &["Psych: The Musical", "The Musical"]),
    ("Grey's Anatomy", &["Song Beneath the Song"]),
    ("The Flash", &["Duet"]),
    ("Lucifer", &["Bloody Celestial Karaoke Jam"]),
    ("It's Always Sunny in Philadelphia", &["The Nightman Cometh", "The Gang Turns Black"]),
    ("How I Met Your Mother", &["Girls Versus Suits", "Girls vs. Suits"]),
    ("That '70s Show", &["That '70s Musical"]),
    ("Fringe", &["Brown Betty"]),
    ("Batman: The Brave and the Bold", &["Mayhem of the Music Meister"]),
    ("The Simpsons", &["All Singing, All Dancing"]),
    ("South Park", &["Elementary School Musical"]),
    ("Bob's Burgers", &["Work Hard or Die Trying", "Glued, Where's My Bob"]),
    ("Xena: Warrior Princess", &["The Bitter Suite", "Lyre, Lyre"]),
    ("Riverdale", &["A Night to Remember", "Wicked Little Town", "Next to Normal"]),
    ("Even Stevens", &["Influenza: The Musical"]),
    ("7th Heaven", &["Red Socks"]),
    ("Daria", &["Daria!"]),
    ("Lexx", &["Brigadoom"]),
    ("The Drew Carey Show", &["Drew and Kate's Duet"]),
    ("Hercules: The Legendary Journeys", &["...And Fancy Free"]),
    ("Oz", &["Variety"]),
    ("Once Upon a Time", &["The Song in Your Heart"]),
    ("The Magicians", &["All That Josh", "A Life in the Day"]),
    ("Supergirl", &["Duet"]),
    ("Legacies", &["Salvatore: The Musical!"]),
    ("Supernatural", &["Fan Fiction"]),
    ("Chicago Hope", &["Brain Salad Surgery"]),
];

/// Shows where every episode counts as a musical
pub const MUSICAL_SERIES: &[&str] = &[
    "Zoey's Extraordinary Playlist",
    "Crazy Ex-Girlfriend",
    "Flight of the Conchords",
    "Galavant",
    "Smash",
    "Glee",
    "Schmigadoon!",
    "High School Musical: The Musical: The Series",
    "Julie and the Phantoms",
    "Katy Keene",
];

/// Check if every episode of this show is a musical (exact title match)
pub fn is_musical_series(show_title: &str) -> bool {
    MUSICAL_SERIES.contains(&show_title)
}

/// Episode-title fragments for a show with specific musical episodes
pub fn musical_episode_targets(show_title: &str) -> Option<&'static [&'static str]> {
    MUSICAL_EPISODES
        .iter()
        .find(|(show, _)| *show == show_title)
        .map(|(_, targets)| *targets)
}

/// First target fragment found in the episode title, if any
pub fn matching_fragment<'a>(targets: &[&'a str], episode_title: &str) -> Option<&'a str> {
    let title = episode_title.to_lowercase();
    targets
        .iter()
        .copied()
        .find(|target| title.contains(&target.to_lowercase()))
}

// =============================================================================
// Themes
// =============================================================================

/// A keyword theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Theme {
    /// Check whether an item's title and summary belong to this theme.
    ///
    /// Substring match over the lower-cased `"{title} {summary}"`. Any
    /// exclusion hit rejects the item, even if inclusion keywords match.
    pub fn matches(&self, title: &str, summary: &str) -> bool {
        matches(title, summary, self)
    }
}

impl ThemeDef {
    fn to_theme(&self) -> Theme {
        Theme {
            id: self.id.to_string(),
            description: self.description.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            exclude: self.exclude.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Keyword matcher, see [`Theme::matches`]
pub fn matches(title: &str, summary: &str, theme: &Theme) -> bool {
    let combined = format!("{} {}", title, summary).to_lowercase();

    if theme
        .exclude
        .iter()
        .any(|exc| combined.contains(&exc.to_lowercase()))
    {
        return false;
    }

    theme
        .keywords
        .iter()
        .any(|kw| combined.contains(&kw.to_lowercase()))
}

/// Requested theme id is neither a keyword theme nor the musical mode
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown theme: {id}. Available themes: {}", .available.join(", "))]
pub struct UnknownTheme {
    pub id: String,
    pub available: Vec<String>,
}

/// What a `create` run selects content by
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Keywords(&'a Theme),
    Musical,
}

impl Selection<'_> {
    pub fn id(&self) -> &str {
        match self {
            Selection::Keywords(theme) => &theme.id,
            Selection::Musical => MUSICAL_ID,
        }
    }
}

/// All themes known for this run: built-ins plus config-defined themes
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: Vec<Theme>,
}

impl ThemeSet {
    /// The built-in theme table
    pub fn builtin() -> Self {
        Self {
            themes: BUILTIN_THEMES.iter().map(ThemeDef::to_theme).collect(),
        }
    }

    /// Built-ins extended with custom themes.
    ///
    /// A custom theme with a built-in id replaces it. The musical id is
    /// reserved and skipped.
    pub fn with_custom(custom: impl IntoIterator<Item = Theme>) -> Self {
        let mut set = Self::builtin();
        for theme in custom {
            if theme.id == MUSICAL_ID {
                tracing::warn!("Ignoring custom theme '{}': id is reserved", MUSICAL_ID);
                continue;
            }
            if theme.keywords.is_empty() {
                tracing::warn!(theme = %theme.id, "Custom theme has no keywords and will match nothing");
            }
            match set.themes.iter_mut().find(|t| t.id == theme.id) {
                Some(existing) => *existing = theme,
                None => set.themes.push(theme),
            }
        }
        set
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    /// Every valid id for `create`, including the musical mode
    pub fn ids(&self) -> Vec<String> {
        self.themes
            .iter()
            .map(|t| t.id.clone())
            .chain(std::iter::once(MUSICAL_ID.to_string()))
            .collect()
    }

    /// Resolve a theme id to a selection mode
    pub fn resolve(&self, id: &str) -> Result<Selection<'_>, UnknownTheme> {
        if id == MUSICAL_ID {
            return Ok(Selection::Musical);
        }
        self.get(id).map(Selection::Keywords).ok_or_else(|| UnknownTheme {
            id: id.to_string(),
            available: self.ids(),
        })
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::builtin()
    }
}
