use battlemap_table::{Combatant, DicePool, Die, InitiativeTracker, parse_initiative};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    // Fixed seed so the printed encounter is reproducible
    let mut rng = StdRng::seed_from_u64(2024);

    let mut tracker = InitiativeTracker::with_combatants(vec![
        Combatant::new("warrior", "Warrior", 0),
        Combatant::new("ranger", "Ranger", 0),
        Combatant::new("dragon", "Dragon", 0),
        Combatant::new("golem", "Golem", 0),
    ]);

    // Everyone rolls a d20 for initiative
    let ids: Vec<String> = tracker.entries().iter().map(|c| c.id.clone()).collect();
    for id in &ids {
        let roll = Die::D20.roll(&mut rng);
        tracker.set_initiative(id, roll as i32).unwrap();
        println!("{:<8} rolls {:>2} for initiative", id, roll);
    }

    // Typed values behave like a number field
    tracker.set_initiative("golem", parse_initiative("7 (slow)")).unwrap();

    tracker.order_by_initiative();
    println!("\nTurn order:");
    for (i, c) in tracker.entries().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, c.name, c.initiative);
    }

    // Play a round and a half
    for _ in 0..6 {
        if let Some(c) = tracker.current() {
            let mut pool = DicePool::new();
            pool.add(Die::D20);
            pool.add(Die::D6);
            if let Some(outcome) = pool.roll(&mut rng) {
                println!("{} attacks: {}", c.name, outcome);
            }
        }
        tracker.next_turn();
    }

    // Drag the last combatant to the top; the turn marker stays put
    let acting = tracker.current().map(|c| c.name.clone());
    tracker.move_entry(tracker.entries().len() - 1, 0).unwrap();
    println!(
        "\nAfter reordering, still {}'s turn: {:?}",
        acting.unwrap_or_default(),
        tracker.current().map(|c| &c.name)
    );
}
