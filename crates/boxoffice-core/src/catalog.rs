//! Closed enumerations for the categorical movie attributes
//!
//! Each enumeration lists its members in training-column order. The form
//! presents them alphabetically sorted, which for the built-in lists is the
//! same order.

use serde::Serialize;

/// The categorical attribute an enumeration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Genre,
    Actor,
    Director,
}

impl CategoryGroup {
    /// Column name prefix used by the trained model
    pub fn prefix(&self) -> &'static str {
        match self {
            CategoryGroup::Genre => "genre",
            CategoryGroup::Actor => "actor",
            CategoryGroup::Director => "director",
        }
    }

    /// Human-readable label shown on the form
    pub fn label(&self) -> &'static str {
        match self {
            CategoryGroup::Genre => "Main Genre",
            CategoryGroup::Actor => "Lead Actor",
            CategoryGroup::Director => "Director",
        }
    }

    /// Indicator column name for a member of this group
    pub fn column(&self, member: &str) -> String {
        format!("{}_{}", self.prefix(), member)
    }
}

impl std::fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A closed set of allowed values with an optional catch-all member
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    pub group: CategoryGroup,
    pub members: &'static [&'static str],
    pub fallback: Option<&'static str>,
    pub default: &'static str,
}

impl Enumeration {
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(&value)
    }

    /// Position of a member within the group's indicator columns
    pub fn position(&self, value: &str) -> Option<usize> {
        self.members.iter().position(|m| *m == value)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in the order a dropdown should list them
    pub fn sorted(&self) -> Vec<&'static str> {
        let mut members = self.members.to_vec();
        members.sort_unstable();
        members
    }

    /// Indicator column names in training order
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        self.members.iter().map(move |m| self.group.column(m))
    }
}

pub const GENRES: Enumeration = Enumeration {
    group: CategoryGroup::Genre,
    members: &[
        "Action",
        "Adventure",
        "Animation",
        "Comedy",
        "Crime",
        "Documentary",
        "Drama",
        "Family",
        "Fantasy",
        "Foreign",
        "History",
        "Horror",
        "Music",
        "Mystery",
        "Romance",
        "Science Fiction",
        "TV Movie",
        "Thriller",
        "War",
        "Western",
    ],
    fallback: None,
    default: "Action",
};

pub const ACTORS: Enumeration = Enumeration {
    group: CategoryGroup::Actor,
    members: &[
        "Adam Sandler",
        "Arnold Schwarzenegger",
        "Ben Stiller",
        "Bruce Willis",
        "Denzel Washington",
        "George Clooney",
        "Harrison Ford",
        "Johnny Depp",
        "Matt Damon",
        "Nicolas Cage",
        "Other",
        "Robert De Niro",
        "Sylvester Stallone",
        "Tom Cruise",
        "Tom Hanks",
    ],
    fallback: Some("Other"),
    default: "Tom Hanks",
};

pub const DIRECTORS: Enumeration = Enumeration {
    group: CategoryGroup::Director,
    members: &[
        "Clint Eastwood",
        "Gore Verbinski",
        "James Cameron",
        "Martin Scorsese",
        "Michael Bay",
        "Other",
        "Peter Jackson",
        "Ridley Scott",
        "Robert Zemeckis",
        "Ron Howard",
        "Sam Raimi",
        "Steven Soderbergh",
        "Steven Spielberg",
        "Tim Burton",
        "Woody Allen",
    ],
    fallback: Some("Other"),
    default: "Steven Spielberg",
};

/// Numeric base columns, in training order
pub const BASE_COLUMNS: [&str; 4] = ["budget", "popularity", "runtime", "release_year"];

/// The full set of enumerations a model was trained against
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub genres: Enumeration,
    pub actors: Enumeration,
    pub directors: Enumeration,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            genres: GENRES,
            actors: ACTORS,
            directors: DIRECTORS,
        }
    }
}

impl Catalog {
    /// Enumerations in feature-vector order
    pub fn groups(&self) -> [&Enumeration; 3] {
        [&self.genres, &self.actors, &self.directors]
    }

    pub fn get(&self, group: CategoryGroup) -> &Enumeration {
        match group {
            CategoryGroup::Genre => &self.genres,
            CategoryGroup::Actor => &self.actors,
            CategoryGroup::Director => &self.directors,
        }
    }

    /// Total number of feature columns
    pub fn width(&self) -> usize {
        BASE_COLUMNS.len() + self.groups().iter().map(|e| e.len()).sum::<usize>()
    }
}
