use std::path::Path;

fn main() {
    let dataset_path = Path::new("data/players.json");
    validate_dataset_file(dataset_path);
    set_build_dependencies();
}

fn validate_dataset_file(dataset_path: &Path) {
    // Ensure dataset exists at build time
    assert!(
        dataset_path.exists(),
        "\n\nDATASET BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the player dataset before building.\n",
        dataset_path.display()
    );

    let dataset_contents = std::fs::read_to_string(dataset_path).unwrap_or_else(|e| {
        panic!(
            "\n\nDATASET BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            dataset_path.display()
        );
    });

    let dataset: serde_json::Value = serde_json::from_str(&dataset_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nDATASET BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            dataset_path.display()
        );
    });

    validate_dataset_structure(&dataset);
}

fn validate_dataset_structure(dataset: &serde_json::Value) {
    let players = dataset.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nDATASET BUILD ERROR: Root must be a JSON object keyed by player name\n\
             Got: {dataset}\n"
        );
    });

    let mut total_seasons = 0;
    for (name, player) in players {
        assert!(
            player.is_object(),
            "\n\nDATASET BUILD ERROR: Player '{name}' must be a JSON object\n"
        );
        total_seasons += validate_player_seasons(player, name);
    }

    println!(
        "cargo:warning=Validated dataset: {} players, {total_seasons} total seasons",
        players.len()
    );
}

fn validate_player_seasons(player: &serde_json::Value, name: &str) -> usize {
    let Some(seasons) = player.get("seasons") else {
        return 0;
    };

    let seasons = seasons.as_array().unwrap_or_else(|| {
        panic!("\n\nDATASET BUILD ERROR: Player '{name}' has non-array 'seasons'\n");
    });

    for (index, season) in seasons.iter().enumerate() {
        assert!(
            season.get("team").and_then(serde_json::Value::as_str).is_some(),
            "\n\nDATASET BUILD ERROR: Player '{name}' season {index} missing 'team' string\n"
        );
        assert!(
            season.get("season").and_then(serde_json::Value::as_i64).is_some(),
            "\n\nDATASET BUILD ERROR: Player '{name}' season {index} missing integer 'season'\n"
        );
    }

    seasons.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the dataset changes
    println!("cargo:rerun-if-changed=data/players.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
