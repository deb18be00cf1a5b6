//! Basic example of using the Formula Pyramid engine

use pyramid_core::{
    find_solutions, select_target, SelectionUpdate, Session, SessionStatus, TileGenerator,
    TriplePolicy,
};

fn main() {
    // Generate a reference tile set (seeded so the run is reproducible)
    println!("Dealing a 10-tile set...\n");
    let mut generator = TileGenerator::with_seed(42);
    let tiles = generator.generate();

    for tile in &tiles {
        println!("  {}: {} {}", tile.label(), tile.operator, tile.operand);
    }

    // Pick the round's target from the outcome distribution
    let target = select_target(&tiles).expect("reference tile set always has a target");
    println!(
        "\nTarget: {} (most frequent outcome, {} of 720 ordered triples)",
        target.value, target.frequency
    );

    // The canonical solution list a player would be shown
    let canonical = find_solutions(&tiles, target.value, TriplePolicy::CombinationsOnly);
    println!("Canonical solutions: {}", canonical.len());
    for solution in &canonical {
        println!(
            "  {} = {}   ({})",
            solution.expression, solution.outcome, solution.name_key
        );
    }

    // Play a round: select tiles three at a time, the way a UI would
    println!("\n--- Playing a round ---\n");
    let mut session = Session::new(tiles, 60).expect("target already determined");
    println!(
        "Target {}, {} seconds on the clock",
        session.target(),
        session.time_remaining()
    );

    // Click through every solution the round knows about
    let attempts: Vec<[u32; 3]> = session
        .solutions()
        .iter()
        .map(|s| [s.tiles[0].id, s.tiles[1].id, s.tiles[2].id])
        .collect();

    for ids in attempts {
        for id in ids {
            match session.toggle_select(id) {
                Ok(SelectionUpdate::Fired(report)) => {
                    println!(
                        "  tried {:?}: outcome {:?}, score {}",
                        ids, report.outcome, report.score
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    println!("  selection rejected: {}", e);
                    break;
                }
            }
        }
        session.tick(); // one second passes per attempt
    }

    let (found, total) = session.progress();
    println!("\nSolutions found: {}/{}", found, total);
    println!(
        "Combinations tried: {}/{}",
        session.tried_count(),
        session.total_ordered_triples()
    );
    println!("Score: {}", session.score());
    println!("Time remaining: {}s", session.time_remaining());
    match session.status() {
        SessionStatus::Active => println!("Round still active."),
        SessionStatus::Ended(reason) => println!("Round ended: {:?}", reason),
    }
}
