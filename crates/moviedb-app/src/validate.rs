//! Field constraints a movie must satisfy before it is persisted.
//!
//! Rules are checked in a fixed order and only the first violation is reported,
//! so a candidate with several invalid fields always yields the same message.

use moviedb_dal::movie::CreateMovie;
use tracing::debug;

pub const NAME_MAX_LEN: usize = 20;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const GENRE_MAX_LEN: usize = 20;
/// Release year must be strictly greater than this.
pub const EARLIEST_RELEASE_YEAR: i32 = 1888;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_LONG: &str = "Name cannot be longer than 20 characters";
pub const DESCRIPTION_TOO_LONG: &str = "Description is too long";
pub const GENRE_REQUIRED: &str = "Genre is required";
pub const GENRE_TOO_LONG: &str = "Genre cannot be empty";
pub const RELEASE_DATE_TOO_EARLY: &str = "Release date cannot be earlier than the year 1888.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: &'static str,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        self.message
    }
}

struct Rule {
    check: fn(&CreateMovie) -> bool,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        check: has_name,
        message: NAME_REQUIRED,
    },
    Rule {
        check: name_fits,
        message: NAME_TOO_LONG,
    },
    Rule {
        check: description_fits,
        message: DESCRIPTION_TOO_LONG,
    },
    Rule {
        check: has_genre,
        message: GENRE_REQUIRED,
    },
    Rule {
        check: genre_fits,
        message: GENRE_TOO_LONG,
    },
    Rule {
        check: released_after_earliest_year,
        message: RELEASE_DATE_TOO_EARLY,
    },
];

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn has_name(movie: &CreateMovie) -> bool {
    !is_blank(&movie.name)
}

fn name_fits(movie: &CreateMovie) -> bool {
    movie.name.chars().count() <= NAME_MAX_LEN
}

fn description_fits(movie: &CreateMovie) -> bool {
    movie.description.chars().count() <= DESCRIPTION_MAX_LEN
}

fn has_genre(movie: &CreateMovie) -> bool {
    !is_blank(&movie.genre)
}

fn genre_fits(movie: &CreateMovie) -> bool {
    movie.genre.chars().count() <= GENRE_MAX_LEN
}

fn released_after_earliest_year(movie: &CreateMovie) -> bool {
    movie.release_date.year() > EARLIEST_RELEASE_YEAR
}

pub fn validate(movie: &CreateMovie) -> Result<(), ValidationError> {
    match RULES.iter().find(|rule| !(rule.check)(movie)) {
        Some(rule) => {
            debug!("Movie {:?} rejected: {}", movie.name, rule.message);
            Err(ValidationError {
                message: rule.message,
            })
        }
        None => Ok(()),
    }
}
