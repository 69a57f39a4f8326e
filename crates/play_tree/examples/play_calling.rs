use play_tree::{Category, PlayFrameExt, PlayTree, TreeConfig};
use polars::prelude::*;
use std::time::Instant;

fn generate_season(n_plays: usize) -> DataFrame {
    let mut play_types: Vec<&str> = Vec::with_capacity(n_plays);
    let mut downs: Vec<i64> = Vec::with_capacity(n_plays);
    let mut distances_needed: Vec<i64> = Vec::with_capacity(n_plays);
    let mut yard_lines: Vec<i64> = Vec::with_capacity(n_plays);
    let mut minutes: Vec<i64> = Vec::with_capacity(n_plays);
    let mut own_scores: Vec<i64> = Vec::with_capacity(n_plays);
    let mut opp_scores: Vec<i64> = Vec::with_capacity(n_plays);
    let mut distances_gained: Vec<i64> = Vec::with_capacity(n_plays);
    let mut turned_over: Vec<bool> = Vec::with_capacity(n_plays);

    for i in 0..n_plays as i64 {
        let down = 1 + i % 4;
        let needed = 1 + (i * 7) % 22;
        let yard_line = 1 + (i * 13) % 99;
        let trailing = (i * 3) % 5 == 0;

        // Simple play-calling habits with a little noise
        let play_type = match (down, needed) {
            (4, _) if yard_line <= 30 => "field_goal",
            (4, _) => "punt",
            (_, 1..=3) if i % 3 == 0 => "run_left",
            (_, 1..=3) => "run_middle",
            (_, 15..) if trailing => "pass_deep_middle",
            (_, 15..) => "pass_deep_right",
            _ if i % 5 == 0 => "run_right",
            _ if i % 2 == 0 => "pass_short_left",
            _ => "pass_short_middle",
        };

        play_types.push(play_type);
        downs.push(down);
        distances_needed.push(needed);
        yard_lines.push(yard_line);
        minutes.push((i * 11) % 60);
        own_scores.push(if trailing { 3 } else { 17 });
        opp_scores.push(10);
        distances_gained.push((i * 17) % 25 - 4);
        turned_over.push(i % 37 == 0);
    }

    df!(
        "play_type" => play_types,
        "down" => downs,
        "distance_needed" => distances_needed,
        "yard_line" => yard_lines,
        "minutes" => minutes,
        "own_score" => own_scores,
        "opp_score" => opp_scores,
        "distance_gained" => distances_gained,
        "turned_over" => turned_over
    )
    .expect("season frame")
}

fn main() {
    let df = generate_season(5000);
    println!("Generated {} plays", df.height());

    let start = Instant::now();
    let store = df
        .to_play_builder()
        .and_then(|builder| builder.finalize())
        .expect("valid plays");
    let tree = PlayTree::fit(&store, TreeConfig::default()).expect("tree fit");
    println!("Fitted in {:.2?}\n", start.elapsed());

    println!("{}", tree.tree_info());
    println!("{}", tree.render());

    // third and eight from midfield, trailing by seven late in the game
    let plays = tree.find_plays(3, 8, 50, 20, 3, 10).expect("valid situation");
    println!("3rd and 8 at midfield, down 7:");
    for (play_type, summary) in plays.iter() {
        println!("  {}: {}", play_type.label(), summary);
    }
}
