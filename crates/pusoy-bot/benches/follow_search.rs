use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pusoy_bot::{FollowPlanner, HandPartition, LeadPlanner};
use pusoy_core::model::card::Card;
use pusoy_core::model::deck::Deck;
use pusoy_core::model::hand::Hand;
use pusoy_core::model::suit::SuitOrder;

fn dealt_hand(seed: u64) -> Hand {
    let mut deck = Deck::shuffled_with_seed(seed);
    let mut cards: Vec<Card> = Vec::with_capacity(13);
    while cards.len() < 13 {
        match deck.pop_top() {
            Some(card) => cards.push(card),
            None => break,
        }
    }
    Hand::with_cards(cards)
}

fn follow_search_bench(c: &mut Criterion) {
    let suits = SuitOrder::STANDARD;
    let mut group = c.benchmark_group("follow_search");
    for seed in [10_000u64, 20_000, 30_000] {
        let hand = dealt_hand(seed);
        let partition = HandPartition::analyze(&hand, &suits);
        let Ok(table) = LeadPlanner::choose(&partition, false, &suits) else {
            continue;
        };
        group.bench_function(format!("analyze_and_follow_{seed}"), |b| {
            b.iter(|| {
                let partition = HandPartition::analyze(black_box(&hand), &suits);
                black_box(FollowPlanner::choose(&partition, &table, &suits))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, follow_search_bench);
criterion_main!(benches);
