//! Listings, purchases, and marketplace bookkeeping.
//!
//! The [`Marketplace`] sells creatures through fixed-price listings.
//! A purchase settles three movements as one atomic unit: the full sale
//! price from buyer to seller, the marketplace fee from buyer to the
//! privileged owner, and the creature's ownership from seller to buyer.
//! The buyer is therefore debited price plus fee; the quoted
//! `seller_amount` (price net of fee) is reported on the receipt for
//! accounting but is not the transferred amount.
//!
//! # Design
//!
//! - **Validate, then commit**: every precondition, including the fee
//!   arithmetic and the seller still owning the creature, is checked
//!   before any balance or record is written.
//! - **Expiry is computed**: an `Active` listing past its expiry ordinal
//!   is rejected at purchase time but never transitioned in storage.
//! - **Duplicate listings are permitted**: the same creature may carry
//!   several `Active` listings. Settling one leaves the others stale;
//!   a stale listing fails at purchase when its seller no longer owns
//!   the creature.

use std::collections::BTreeMap;

use menagerie_core::clock::BlockClock;
use menagerie_core::config::ProtocolConfig;
use menagerie_core::error::ContractError;
use menagerie_ledger::{TokenLedger, TransferLeg};
use menagerie_registry::CreatureRegistry;
use menagerie_types::{
    CreatureId, EntryReason, Listing, ListingId, ListingStatus, MarketStats, Principal, Purchase,
    SaleRecord,
};

/// Fee rates are expressed in basis points out of this denominator.
const FEE_DENOMINATOR: u128 = 1000;

/// Fixed-price creature marketplace.
#[derive(Debug)]
pub struct Marketplace {
    /// Every listing ever created, keyed by id. Terminal listings are
    /// kept for history.
    listings: BTreeMap<ListingId, Listing>,
    /// Per-creature running sale statistics, created on first sale.
    sale_history: BTreeMap<CreatureId, SaleRecord>,
    /// Highest listing id allocated so far (0 before the first listing).
    last_listing_id: u64,
    /// Current fee rate in basis points out of [`FEE_DENOMINATOR`].
    fee_basis_points: u64,
    /// Listings ever created, including cancelled and sold ones.
    total_listings: u64,
    /// Cumulative sum of settled sale prices, in minor units.
    total_volume: u128,
    /// Privileged owner: collects fees and may adjust the fee rate.
    owner: Principal,
    /// Protocol tunables fixed at construction.
    config: ProtocolConfig,
}

impl Marketplace {
    /// Create an empty marketplace governed by `owner` under `config`.
    ///
    /// The starting fee rate is taken from `config.fee_basis_points`.
    pub const fn new(owner: Principal, config: ProtocolConfig) -> Self {
        Self {
            listings: BTreeMap::new(),
            sale_history: BTreeMap::new(),
            last_listing_id: 0,
            fee_basis_points: config.fee_basis_points,
            total_listings: 0,
            total_volume: 0,
            owner,
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Return the listing with the given id, if it exists.
    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(&id)
    }

    /// Return the sale history of `creature_id`, if it has ever sold.
    pub fn sale_record(&self, creature_id: CreatureId) -> Option<&SaleRecord> {
        self.sale_history.get(&creature_id)
    }

    /// Return a snapshot of the marketplace-wide counters.
    pub const fn stats(&self) -> MarketStats {
        MarketStats {
            fee_basis_points: self.fee_basis_points,
            total_listings: self.total_listings,
            total_volume: self.total_volume,
        }
    }

    /// Return the current fee rate in basis points out of 1000.
    pub const fn fee_basis_points(&self) -> u64 {
        self.fee_basis_points
    }

    // -----------------------------------------------------------------------
    // Listing lifecycle
    // -----------------------------------------------------------------------

    /// List a creature for sale at a fixed price.
    ///
    /// The listing is purchasable until the expiry ordinal (creation
    /// ordinal plus the configured duration) is reached. Nothing stops
    /// a creature from carrying several active listings at once.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotFound`] if the creature has no
    /// resolvable owner, [`ContractError::NotAuthorized`] if `caller`
    /// is not that owner, and [`ContractError::InvalidParams`] if
    /// `price` is below the configured minimum.
    pub fn list_creature(
        &mut self,
        caller: Principal,
        registry: &CreatureRegistry,
        creature_id: CreatureId,
        price: u128,
        clock: &dyn BlockClock,
    ) -> Result<ListingId, ContractError> {
        let creature_owner = registry.owner_of(creature_id).ok_or(ContractError::NotFound)?;
        if caller != creature_owner {
            return Err(ContractError::NotAuthorized);
        }
        if price < self.config.min_listing_price {
            return Err(ContractError::InvalidParams);
        }
        let serial = self
            .last_listing_id
            .checked_add(1)
            .ok_or(ContractError::InvalidParams)?;
        let listed_at = clock.current_ordinal();
        let expires_at = listed_at
            .checked_add(self.config.listing_duration_ordinals)
            .ok_or(ContractError::InvalidParams)?;

        let id = ListingId::new(serial);
        self.listings.insert(
            id,
            Listing {
                id,
                creature_id,
                seller: caller,
                price,
                listed_at_ordinal: listed_at,
                expires_at_ordinal: expires_at,
                status: ListingStatus::Active,
            },
        );
        self.last_listing_id = serial;
        self.total_listings = self.total_listings.saturating_add(1);
        tracing::debug!(
            listing = serial,
            creature = creature_id.into_inner(),
            price,
            "creature listed"
        );
        Ok(id)
    }

    /// Cancel an active listing.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotFound`] if no such listing exists,
    /// [`ContractError::NotAuthorized`] if `caller` is not the seller,
    /// and [`ContractError::NotListed`] if the listing is not active.
    pub fn cancel_listing(
        &mut self,
        caller: Principal,
        listing_id: ListingId,
    ) -> Result<(), ContractError> {
        let listing = self
            .listings
            .get_mut(&listing_id)
            .ok_or(ContractError::NotFound)?;
        if listing.seller != caller {
            return Err(ContractError::NotAuthorized);
        }
        if listing.status != ListingStatus::Active {
            return Err(ContractError::NotListed);
        }

        listing.status = ListingStatus::Cancelled;
        Ok(())
    }

    /// Change the asking price of an active listing.
    ///
    /// The expiry ordinal is left untouched: repricing does not buy the
    /// listing more time.
    ///
    /// # Errors
    ///
    /// Same as [`Marketplace::cancel_listing`], plus
    /// [`ContractError::InvalidParams`] if `new_price` is below the
    /// configured minimum.
    pub fn update_listing_price(
        &mut self,
        caller: Principal,
        listing_id: ListingId,
        new_price: u128,
    ) -> Result<(), ContractError> {
        let minimum = self.config.min_listing_price;
        let listing = self
            .listings
            .get_mut(&listing_id)
            .ok_or(ContractError::NotFound)?;
        if listing.seller != caller {
            return Err(ContractError::NotAuthorized);
        }
        if listing.status != ListingStatus::Active {
            return Err(ContractError::NotListed);
        }
        if new_price < minimum {
            return Err(ContractError::InvalidParams);
        }

        listing.price = new_price;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Purchase
    // -----------------------------------------------------------------------

    /// Buy a listed creature at its asking price.
    ///
    /// Settles atomically: the full price moves from buyer to seller,
    /// the fee (`floor(price * fee_basis_points / 1000)`) moves from
    /// buyer to the privileged owner, and the creature's ownership moves
    /// from seller to buyer. If any movement cannot be applied, no
    /// state changes at all. On success the listing flips to `Sold`,
    /// the creature's sale history is upserted, and the full price is
    /// added to cumulative volume.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotFound`] if no such listing exists;
    /// [`ContractError::ListingExpired`] if the listing is not
    /// purchasable (expired, sold, or cancelled);
    /// [`ContractError::InvalidParams`] if `caller` is the seller;
    /// [`ContractError::NotAuthorized`] if the seller no longer owns the
    /// creature; [`ContractError::InsufficientBalance`] if `caller`
    /// cannot cover price plus fee.
    pub fn buy_creature(
        &mut self,
        caller: Principal,
        listing_id: ListingId,
        registry: &mut CreatureRegistry,
        ledger: &mut TokenLedger,
        clock: &dyn BlockClock,
    ) -> Result<Purchase, ContractError> {
        let listing = self
            .listings
            .get(&listing_id)
            .ok_or(ContractError::NotFound)?;
        if !listing.is_purchasable(clock.current_ordinal()) {
            return Err(ContractError::ListingExpired);
        }
        let creature_id = listing.creature_id;
        let seller = listing.seller;
        let price = listing.price;
        if caller == seller {
            return Err(ContractError::InvalidParams);
        }
        // Ownership is re-validated before the first money leg; a stale
        // listing fails here, not mid-settlement.
        if registry.owner_of(creature_id) != Some(seller) {
            return Err(ContractError::NotAuthorized);
        }

        let fee = price
            .checked_mul(u128::from(self.fee_basis_points))
            .and_then(|scaled| scaled.checked_div(FEE_DENOMINATOR))
            .ok_or(ContractError::InvalidParams)?;
        let seller_amount = price.checked_sub(fee).ok_or(ContractError::InvalidParams)?;

        // The buyer pays the full price and the fee on top of it.
        let mut legs = vec![TransferLeg {
            amount: price,
            from: caller,
            to: seller,
            reason: EntryReason::SalePayment,
        }];
        if fee > 0 {
            legs.push(TransferLeg {
                amount: fee,
                from: caller,
                to: self.owner,
                reason: EntryReason::MarketFee,
            });
        }
        ledger.settle(&legs)?;
        registry.settle_transfer(creature_id, seller, caller)?;

        // Money and ownership are settled; record the sale.
        self.sale_history
            .entry(creature_id)
            .and_modify(|record| {
                record.last_price = price;
                record.total_sales = record.total_sales.saturating_add(1);
                if price > record.highest_price {
                    record.highest_price = price;
                }
            })
            .or_insert(SaleRecord {
                last_price: price,
                total_sales: 1,
                highest_price: price,
            });
        if let Some(settled) = self.listings.get_mut(&listing_id) {
            settled.status = ListingStatus::Sold;
        }
        self.total_volume = self.total_volume.saturating_add(price);
        tracing::debug!(
            listing = listing_id.into_inner(),
            creature = creature_id.into_inner(),
            price,
            fee,
            "creature purchased"
        );
        Ok(Purchase {
            listing_id,
            creature_id,
            seller,
            buyer: caller,
            price,
            fee,
            seller_amount,
        })
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Change the marketplace fee rate.
    ///
    /// Only the privileged owner may call this, and the new rate must
    /// not exceed the configured cap.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotAuthorized`] if `caller` is not the
    /// privileged owner, and [`ContractError::InvalidParams`] if
    /// `new_fee` exceeds the cap.
    pub fn update_fee(&mut self, caller: Principal, new_fee: u64) -> Result<(), ContractError> {
        if caller != self.owner {
            return Err(ContractError::NotAuthorized);
        }
        if new_fee > self.config.max_fee_basis_points {
            return Err(ContractError::InvalidParams);
        }

        self.fee_basis_points = new_fee;
        tracing::debug!(fee_basis_points = new_fee, "marketplace fee updated");
        Ok(())
    }
}
