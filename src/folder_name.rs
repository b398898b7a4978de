use regex::Regex;
use std::sync::LazyLock;

static SEASON_FOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^season(?-u:\s)*([0-9]+)").expect("valid season folder regex"));

pub const SPECIALS_FOLDER: &str = "Specials";

/// Title and year parsed from a show folder such as `Foo (2020)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFolder {
    pub title: String,
    pub year: Option<String>,
}

/// Split `Title (YYYY)` on the last `(`. Without a `(` the whole name is the title.
pub fn parse_show_folder(name: &str) -> ShowFolder {
    match name.rfind('(') {
        Some(pos) => {
            let year = name[pos + 1..]
                .get(..4)
                .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
                .map(String::from);
            ShowFolder {
                title: name[..pos].trim().to_string(),
                year,
            }
        }
        None => ShowFolder {
            title: name.to_string(),
            year: None,
        },
    }
}

/// `Season 3` / `season03` → 3, `Specials` → 0.
pub fn season_number_from_folder(name: &str) -> Option<u32> {
    if let Some(caps) = SEASON_FOLDER.captures(name) {
        return caps[1].parse().ok();
    }
    if name.eq_ignore_ascii_case(SPECIALS_FOLDER) {
        return Some(0);
    }
    None
}

pub fn season_folder_name(season_number: u32) -> String {
    if season_number == 0 {
        SPECIALS_FOLDER.to_string()
    } else {
        format!("Season {:02}", season_number)
    }
}
