//! Random board generation: samples catalog tiles without replacement.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::tiles::TileCatalog;
use crate::models::{QuestTile, Side, SourceGame};

/// Rotations a generated tile may receive.
pub const ROTATIONS: [i32; 4] = [0, 90, 180, 270];

/// Picks up to `board_size` distinct tiles from the games in `allowed`.
///
/// Each pick gets a random face (`r` or `v`), a random rotation and a
/// sequential `order_index`. The result has `min(board_size, filtered)` tiles.
pub fn generate_board<R: Rng + ?Sized>(
    catalog: &TileCatalog,
    board_size: usize,
    allowed: &[SourceGame],
    rng: &mut R,
) -> Vec<QuestTile> {
    let mut remaining = catalog.filtered(allowed);
    let count = board_size.min(remaining.len());
    let mut board = Vec::with_capacity(count);

    for index in 0..count {
        let Some(picked) = remaining.choose(rng).cloned() else {
            break;
        };

        let side = if rng.gen_bool(0.5) { Side::R } else { Side::V };
        let rotation = ROTATIONS.choose(rng).copied().unwrap_or(0);
        let number: String = picked.name.chars().filter(char::is_ascii_digit).collect();

        board.push(QuestTile {
            id: Uuid::new_v4(),
            name: format!(
                "{number}{}\n{}",
                side.as_str().to_ascii_uppercase(),
                picked.source_game.code()
            ),
            source_game: picked.source_game,
            side,
            rotation,
            order_index: index as i32,
        });

        remaining.retain(|t| !(t.name == picked.name && t.source_game == picked.source_game));
    }

    debug!(
        "Generated board: {:?}",
        board
            .iter()
            .map(|t| format!("{}: {}", t.order_index, t.image_name()))
            .collect::<Vec<_>>()
    );
    board
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_request_larger_than_catalog_returns_whole_filter() {
        let catalog = TileCatalog::standard();
        // Friends and Foes has exactly 5 tiles.
        let board = generate_board(&catalog, 8, &[SourceGame::FriendsAndFoes], &mut rng());
        assert_eq!(board.len(), 5);
        let orders: Vec<i32> = board.iter().map(|t| t.order_index).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_request_smaller_than_catalog_returns_exact_size() {
        let catalog = TileCatalog::standard();
        let board = generate_board(
            &catalog,
            6,
            &[SourceGame::BlackPlague, SourceGame::GreenHoard],
            &mut rng(),
        );
        assert_eq!(board.len(), 6);
    }

    #[test]
    fn test_no_duplicate_picks() {
        let catalog = TileCatalog::standard();
        let board = generate_board(&catalog, 30, &SourceGame::ALL, &mut rng());
        assert_eq!(board.len(), 30);
        let unique: HashSet<(String, SourceGame)> = board
            .iter()
            .map(|t| (t.label().trim_end_matches(['R', 'V']).to_string(), t.source_game))
            .collect();
        assert_eq!(unique.len(), 30);
    }

    #[test]
    fn test_generated_tiles_have_valid_rotation_side_and_game() {
        let catalog = TileCatalog::standard();
        let allowed = [SourceGame::Wulfsburg, SourceGame::NoRestForTheWicked];
        let board = generate_board(&catalog, 7, &allowed, &mut rng());
        for tile in &board {
            assert!(ROTATIONS.contains(&tile.rotation));
            assert!(matches!(tile.side, Side::R | Side::V));
            assert!(allowed.contains(&tile.source_game));
        }
    }

    #[test]
    fn test_generated_name_is_decorated() {
        let catalog = TileCatalog::standard();
        let board = generate_board(&catalog, 2, &[SourceGame::Wulfsburg], &mut rng());
        for tile in &board {
            let side = tile.side.as_str().to_ascii_uppercase();
            assert!(tile.name.ends_with("\nWB"), "name was {:?}", tile.name);
            assert!(tile.label().ends_with(&side));
            assert!(tile.label().starts_with("10") || tile.label().starts_with("11"));
        }
    }

    #[test]
    fn test_zero_size_or_no_games_yields_empty_board() {
        let catalog = TileCatalog::standard();
        assert!(generate_board(&catalog, 0, &SourceGame::ALL, &mut rng()).is_empty());
        assert!(generate_board(&catalog, 5, &[], &mut rng()).is_empty());
    }

    #[test]
    fn test_same_seed_same_board() {
        let catalog = TileCatalog::standard();
        let a = generate_board(&catalog, 9, &SourceGame::ALL, &mut rng());
        let b = generate_board(&catalog, 9, &SourceGame::ALL, &mut rng());
        let names_a: Vec<&str> = a.iter().map(|t| t.name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names_a, names_b);
    }
}
