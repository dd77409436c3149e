//! End-to-end marketplace flows across the registry, ledger, and market.
//!
//! Each test drives the full stack: principals are funded through the
//! ledger, creatures are minted through the registry, and sales settle
//! through the marketplace. Balance assertions are exact, and every
//! flow ends with a ledger conservation audit.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::too_many_lines)]

use menagerie_core::clock::{BlockClock, OrdinalClock};
use menagerie_core::config::ProtocolConfig;
use menagerie_core::entropy::{EntropySource, FixedEntropy};
use menagerie_core::error::ContractError;
use menagerie_ledger::{AuditResult, TokenLedger};
use menagerie_market::Marketplace;
use menagerie_registry::CreatureRegistry;
use menagerie_types::{CreatureId, ListingStatus, Principal};

/// Mint price from the reference parameters.
const MINT_PRICE: u128 = 100_000_000;

// =============================================================================
// Helpers
// =============================================================================

struct World {
    registry: CreatureRegistry,
    market: Marketplace,
    ledger: TokenLedger,
    owner: Principal,
}

/// A fresh protocol instance: registry and market share one privileged
/// owner and the default parameters.
fn world() -> World {
    let owner = Principal::new();
    World {
        registry: CreatureRegistry::new(owner, ProtocolConfig::default()),
        market: Marketplace::new(owner, ProtocolConfig::default()),
        ledger: TokenLedger::new(),
        owner,
    }
}

fn entropy() -> impl EntropySource {
    FixedEntropy([0xC4; 32])
}

/// Fund `keeper` with the mint price on top of `spending_money`, then
/// mint one creature to them.
fn funded_mint(
    world: &mut World,
    keeper: Principal,
    spending_money: u128,
    clock: &dyn BlockClock,
) -> CreatureId {
    world
        .ledger
        .deposit(keeper, MINT_PRICE.checked_add(spending_money).unwrap())
        .unwrap();
    world
        .registry
        .mint(keeper, clock, &entropy(), &mut world.ledger)
        .unwrap()
}

// =============================================================================
// Flows
// =============================================================================

#[test]
fn a_full_sale_settles_every_balance_exactly() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let seller = Principal::new();
    let buyer = Principal::new();

    let creature = funded_mint(&mut w, seller, 0, &clock);
    w.ledger.deposit(buyer, 10_000_000).unwrap();

    let listing = w
        .market
        .list_creature(seller, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    let receipt = w
        .market
        .buy_creature(buyer, listing, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    // Receipt: full price, 2.5% fee, net amount quoted but not transferred.
    assert_eq!(receipt.price, 2_000_000);
    assert_eq!(receipt.fee, 50_000);
    assert_eq!(receipt.seller_amount, 1_950_000);

    // Buyer paid price plus fee; seller got the whole price; the
    // privileged owner holds the mint price and the sale fee.
    assert_eq!(w.ledger.balance_of(buyer), 7_950_000);
    assert_eq!(w.ledger.balance_of(seller), 2_000_000);
    assert_eq!(w.ledger.balance_of(w.owner), 100_050_000);

    assert_eq!(w.registry.owner_of(creature), Some(buyer));
    assert_eq!(
        w.market.listing(listing).unwrap().status,
        ListingStatus::Sold
    );
    assert_eq!(w.market.stats().total_volume, 2_000_000);

    let record = w.market.sale_record(creature).unwrap();
    assert_eq!(record.total_sales, 1);
    assert_eq!(record.last_price, 2_000_000);
    assert_eq!(record.highest_price, 2_000_000);

    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}

#[test]
fn a_bought_creature_breeds_for_its_new_owner() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let seller = Principal::new();
    let buyer = Principal::new();

    let wild = funded_mint(&mut w, seller, 0, &clock);
    let homebred = funded_mint(&mut w, buyer, 10_000_000, &clock);

    let listing = w
        .market
        .list_creature(seller, &w.registry, wild, 2_000_000, &clock)
        .unwrap();
    w.market
        .buy_creature(buyer, listing, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();
    assert_eq!(w.registry.owner_of(wild), Some(buyer));

    // The buyer now owns both parents; the bought creature leads.
    let child = w.registry.breed(buyer, wild, homebred, &clock).unwrap();

    assert_eq!(w.registry.owner_of(child), Some(buyer));
    let record = w.registry.traits_of(child).unwrap();
    assert_eq!(record.generation, 2);
    assert_eq!(record.parent_one, Some(wild));
    assert_eq!(record.parent_two, Some(homebred));
    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}

#[test]
fn resales_track_last_and_highest_prices() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let alice = Principal::new();
    let bob = Principal::new();
    let carol = Principal::new();

    let creature = funded_mint(&mut w, alice, 0, &clock);
    w.ledger.deposit(bob, 10_000_000).unwrap();
    w.ledger.deposit(carol, 10_000_000).unwrap();

    // Alice -> Bob at 2,000,000.
    let first = w
        .market
        .list_creature(alice, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    w.market
        .buy_creature(bob, first, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    // Bob -> Carol at 5,000,000: a new high.
    let second = w
        .market
        .list_creature(bob, &w.registry, creature, 5_000_000, &clock)
        .unwrap();
    w.market
        .buy_creature(carol, second, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    // Carol -> Alice at 1,500,000: below the high watermark.
    let third = w
        .market
        .list_creature(carol, &w.registry, creature, 1_500_000, &clock)
        .unwrap();
    w.market
        .buy_creature(alice, third, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    let record = w.market.sale_record(creature).unwrap();
    assert_eq!(record.total_sales, 3);
    assert_eq!(record.last_price, 1_500_000);
    assert_eq!(record.highest_price, 5_000_000);
    assert_eq!(w.market.stats().total_volume, 8_500_000);

    // Every hop charged its fee on top of the price.
    assert_eq!(w.ledger.balance_of(alice), 462_500);
    assert_eq!(w.ledger.balance_of(bob), 12_950_000);
    assert_eq!(w.ledger.balance_of(carol), 6_375_000);
    assert_eq!(w.ledger.balance_of(w.owner), 100_212_500);
    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}

#[test]
fn a_listing_settles_at_most_once() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let seller = Principal::new();
    let first_buyer = Principal::new();
    let second_buyer = Principal::new();

    let creature = funded_mint(&mut w, seller, 0, &clock);
    w.ledger.deposit(first_buyer, 10_000_000).unwrap();
    w.ledger.deposit(second_buyer, 10_000_000).unwrap();

    let listing = w
        .market
        .list_creature(seller, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    w.market
        .buy_creature(first_buyer, listing, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    // The listing is terminal now; a second settlement attempt reports
    // it as no longer purchasable and moves nothing.
    assert_eq!(
        w.market
            .buy_creature(second_buyer, listing, &mut w.registry, &mut w.ledger, &clock),
        Err(ContractError::ListingExpired)
    );

    assert_eq!(w.ledger.balance_of(second_buyer), 10_000_000);
    assert_eq!(w.registry.owner_of(creature), Some(first_buyer));
    assert_eq!(w.market.stats().total_volume, 2_000_000);
    assert_eq!(w.market.sale_record(creature).unwrap().total_sales, 1);
    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}

#[test]
fn a_stale_duplicate_listing_cannot_move_the_creature_again() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let seller = Principal::new();
    let first_buyer = Principal::new();
    let second_buyer = Principal::new();

    let creature = funded_mint(&mut w, seller, 0, &clock);
    w.ledger.deposit(first_buyer, 10_000_000).unwrap();
    w.ledger.deposit(second_buyer, 10_000_000).unwrap();

    // Two live listings for the same creature.
    let cheap = w
        .market
        .list_creature(seller, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    let dear = w
        .market
        .list_creature(seller, &w.registry, creature, 3_000_000, &clock)
        .unwrap();

    w.market
        .buy_creature(first_buyer, cheap, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();

    // The second listing is still stored Active, but its seller no
    // longer owns the creature, so the ownership re-validation rejects
    // the sale before any money moves.
    assert_eq!(
        w.market.listing(dear).unwrap().status,
        ListingStatus::Active
    );
    assert_eq!(
        w.market
            .buy_creature(second_buyer, dear, &mut w.registry, &mut w.ledger, &clock),
        Err(ContractError::NotAuthorized)
    );

    assert_eq!(w.registry.owner_of(creature), Some(first_buyer));
    assert_eq!(w.ledger.balance_of(second_buyer), 10_000_000);
    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}

#[test]
fn fee_changes_apply_to_later_sales_only() {
    let clock = OrdinalClock::starting_at(500);
    let mut w = world();
    let seller = Principal::new();
    let buyer = Principal::new();

    let creature = funded_mint(&mut w, seller, 0, &clock);
    w.ledger.deposit(buyer, 10_000_000).unwrap();

    // Raise the fee to the 10% cap before the first sale.
    w.market.update_fee(w.owner, 100).unwrap();
    let listing = w
        .market
        .list_creature(seller, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    let receipt = w
        .market
        .buy_creature(buyer, listing, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();
    assert_eq!(receipt.fee, 200_000);
    assert_eq!(w.ledger.balance_of(buyer), 7_800_000); // 10,000,000 - 2,200,000

    // Drop the fee to zero; the resale charges nothing on top.
    w.market.update_fee(w.owner, 0).unwrap();
    let owner_before = w.ledger.balance_of(w.owner);
    let resale = w
        .market
        .list_creature(buyer, &w.registry, creature, 2_000_000, &clock)
        .unwrap();
    let receipt = w
        .market
        .buy_creature(seller, resale, &mut w.registry, &mut w.ledger, &clock)
        .unwrap();
    assert_eq!(receipt.fee, 0);
    assert_eq!(w.ledger.balance_of(w.owner), owner_before);
    assert_eq!(w.ledger.audit(), AuditResult::Balanced);
}
