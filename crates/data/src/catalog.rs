use anyhow::Context;
use gloomdeck_core::{AbilityCatalog, AbilitySet, CardId};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BASIC_PREFIX: &str = "jl-basic-";
const BACK_SUFFIX: &str = "back.png";
const NUMBERED_CARDS: usize = 8;

/// Jaws of the Lion monsters and their ability card file prefixes.
const MONSTER_PREFIXES: &[(&str, &str)] = &[
    ("black-sludge", "jl-ma-bs-"),
    ("boss", "jl-ma-bo-"),
    ("chaos-demon", "jl-ma-cd-"),
    ("giant-viper", "jl-ma-gv-"),
    ("imp", "jl-ma-im-"),
    ("living-corpse", "jl-ma-lc-"),
    ("living-spirit", "jl-ma-ls-"),
    ("monstrosity", "jl-ma-mo-"),
    ("stone-golem", "jl-ma-sg-"),
    ("vermling-raider", "jl-ma-vr-"),
    ("vermling-scout", "jl-ma-vs-"),
    ("zealot", "jl-ma-ze-"),
];

const BASIC_CARDS: &[(&str, &[&str])] = &[
    (
        "giant-viper",
        &["constrict", "find-cover", "swift-fangs", "toxic-frenzy"],
    ),
    (
        "vermling-raider",
        &["careful-throw", "dual-daggers", "nothing-special", "screaming-shot"],
    ),
    ("zealot", &["boil-blood", "drain-life", "hex-whip", "vile-scourge"]),
];

/// Built-in catalogue, rendered under `url_prefix`.
pub fn builtin_catalog(url_prefix: &str) -> AbilityCatalog {
    let mut sets = Vec::new();
    for (monster, prefix) in MONSTER_PREFIXES {
        sets.push(AbilitySet {
            name: monster.to_string(),
            card_back: card_path(url_prefix, monster, &format!("{prefix}{BACK_SUFFIX}")),
            cards: (1..=NUMBERED_CARDS)
                .map(|n| card_path(url_prefix, monster, &format!("{prefix}{n}.png")))
                .collect(),
        });
    }
    for (monster, cards) in BASIC_CARDS {
        sets.push(AbilitySet {
            name: basic_name(monster),
            card_back: card_path(url_prefix, monster, &format!("{BASIC_PREFIX}{monster}-back.png")),
            cards: cards
                .iter()
                .map(|card| card_path(url_prefix, monster, &format!("{BASIC_PREFIX}{card}.png")))
                .collect(),
        });
    }
    AbilityCatalog::new(sets)
}

pub fn load_catalog_file(path: &Path) -> anyhow::Result<AbilityCatalog> {
    let sets: Vec<AbilitySet> = crate::load_json(path)?;
    Ok(AbilityCatalog::new(sets))
}

/// Build a catalogue from a directory with one folder per monster.
///
/// Numbered files (`*-1.png`, `*-2.png`, ...) form the monster's set with the
/// non-basic `*back.png` as card back. `jl-basic-*` files form a separate
/// "Basic" set. Folders without cards are skipped.
pub fn scan_ability_dir(dir: &Path, url_prefix: &str) -> anyhow::Result<AbilityCatalog> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read {}", dir.display()))?;
        if entry.file_type()?.is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    folders.sort();

    let mut sets = Vec::new();
    for folder in folders {
        let path = dir.join(&folder);
        let mut files = Vec::new();
        for entry in fs::read_dir(&path).with_context(|| format!("read {}", path.display()))? {
            let entry = entry.with_context(|| format!("read {}", path.display()))?;
            if entry.file_type()?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        let scanned = scan_folder(&folder, &files, url_prefix);
        if scanned.is_empty() {
            warn!(folder = %folder, "no ability cards found");
        }
        sets.extend(scanned);
    }
    debug!(dir = %dir.display(), sets = sets.len(), "scanned ability cards");
    Ok(AbilityCatalog::new(sets))
}

fn scan_folder(folder: &str, files: &[String], url_prefix: &str) -> Vec<AbilitySet> {
    let mut sets = Vec::new();

    let mut numbered: Vec<(u32, &String)> = files
        .iter()
        .filter(|file| !file.starts_with(BASIC_PREFIX))
        .filter_map(|file| card_number(file).map(|n| (n, file)))
        .collect();
    numbered.sort();
    if !numbered.is_empty() {
        let back = files
            .iter()
            .find(|file| !file.starts_with(BASIC_PREFIX) && file.ends_with(BACK_SUFFIX));
        sets.push(AbilitySet {
            name: folder.to_string(),
            card_back: back
                .map(|file| card_path(url_prefix, folder, file))
                .unwrap_or_else(|| CardId::from(gloomdeck_core::CARD_BACK)),
            cards: numbered
                .iter()
                .map(|(_, file)| card_path(url_prefix, folder, file))
                .collect(),
        });
    }

    let basic: Vec<&String> = files
        .iter()
        .filter(|file| file.starts_with(BASIC_PREFIX) && !file.ends_with("-back.png"))
        .collect();
    if !basic.is_empty() {
        let back = files
            .iter()
            .find(|file| file.starts_with(BASIC_PREFIX) && file.ends_with("-back.png"));
        sets.push(AbilitySet {
            name: basic_name(folder),
            card_back: back
                .map(|file| card_path(url_prefix, folder, file))
                .unwrap_or_else(|| CardId::from(gloomdeck_core::CARD_BACK)),
            cards: basic
                .iter()
                .map(|file| card_path(url_prefix, folder, file))
                .collect(),
        });
    }
    sets
}

/// `jl-ma-im-3.png` -> 3
fn card_number(file: &str) -> Option<u32> {
    let stem = file.strip_suffix(".png")?;
    let (_, number) = stem.rsplit_once('-')?;
    number.parse().ok()
}

/// "giant-viper" -> "Basic giant viper"
fn basic_name(folder: &str) -> String {
    format!("Basic {}", folder.replacen('-', " ", 1))
}

fn card_path(url_prefix: &str, folder: &str, file: &str) -> CardId {
    CardId::new(format!("{}/{folder}/{file}", url_prefix.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const PREFIX: &str = "/imgs/monster-ability-cards/jaws-of-the-lion";

    #[test]
    fn builtin_has_all_monsters_and_basics() {
        let catalog = builtin_catalog(PREFIX);
        assert_eq!(catalog.len(), MONSTER_PREFIXES.len() + BASIC_CARDS.len());
        let imp = catalog.get("imp").expect("imp");
        assert_eq!(imp.cards.len(), 8);
        assert_eq!(
            imp.cards[0].as_str(),
            "/imgs/monster-ability-cards/jaws-of-the-lion/imp/jl-ma-im-1.png"
        );
        assert_eq!(
            imp.card_back.as_str(),
            "/imgs/monster-ability-cards/jaws-of-the-lion/imp/jl-ma-im-back.png"
        );
        let basic = catalog.get("Basic giant viper").expect("basic viper");
        assert_eq!(basic.cards.len(), 4);
        assert!(basic.card_back.as_str().ends_with("jl-basic-giant-viper-back.png"));
    }

    #[test]
    fn card_numbers_parse() {
        assert_eq!(card_number("jl-ma-im-3.png"), Some(3));
        assert_eq!(card_number("jl-ma-im-12.png"), Some(12));
        assert_eq!(card_number("jl-ma-im-back.png"), None);
        assert_eq!(card_number("notes.txt"), None);
    }

    #[test]
    fn scan_splits_regular_and_basic_sets() {
        let root = unique_temp_dir();
        let viper = root.join("giant-viper");
        fs::create_dir_all(&viper).expect("mkdir");
        fs::create_dir_all(root.join("empty")).expect("mkdir");
        for file in [
            "jl-ma-gv-1.png",
            "jl-ma-gv-2.png",
            "jl-ma-gv-10.png",
            "jl-ma-gv-back.png",
            "jl-basic-constrict.png",
            "jl-basic-find-cover.png",
            "jl-basic-giant-viper-back.png",
        ] {
            fs::write(viper.join(file), b"").expect("write");
        }

        let catalog = scan_ability_dir(&root, "/cards").expect("scan");
        assert_eq!(catalog.names(), vec!["Basic giant viper", "giant-viper"]);

        let regular = catalog.get("giant-viper").expect("regular");
        let cards: Vec<&str> = regular.cards.iter().map(CardId::as_str).collect();
        assert_eq!(
            cards,
            vec![
                "/cards/giant-viper/jl-ma-gv-1.png",
                "/cards/giant-viper/jl-ma-gv-2.png",
                "/cards/giant-viper/jl-ma-gv-10.png",
            ]
        );
        assert_eq!(regular.card_back.as_str(), "/cards/giant-viper/jl-ma-gv-back.png");

        let basic = catalog.get("Basic giant viper").expect("basic");
        assert_eq!(basic.cards.len(), 2);
        assert_eq!(
            basic.card_back.as_str(),
            "/cards/giant-viper/jl-basic-giant-viper-back.png"
        );
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn scan_of_missing_dir_fails_with_context() {
        let err = scan_ability_dir(Path::new("/definitely/not/here"), PREFIX)
            .expect_err("missing dir");
        assert!(err.to_string().contains("read /definitely/not/here"));
    }

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "gloomdeck_catalog_test_{}_{}",
            std::process::id(),
            nanos
        ))
    }
}
