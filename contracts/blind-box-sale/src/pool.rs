//! Metadata index allocation.
//!
//! The pool is a virtual array `[1, 2, ..., capacity]`. Each draw picks a live
//! slot at random, takes the index stored there, and moves the last live slot
//! into the hole (swap-and-pop Fisher-Yates). Only slots that were ever swapped
//! are stored, so a fresh pool costs nothing.
//!
//! Entropy comes from block metadata and the buyer address. Anyone who can
//! choose the block a purchase lands in can predict or steer the outcome; the
//! sale accepts that.

use cosmwasm_std::{Addr, Env, Storage};
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::state::{SalePool, ALLOCATED, POOL_SLOTS};

const SEED_DOMAIN: &[u8] = b"blind_box_v1";

/// Per-purchase seed over block height, time, chain id, tx index, buyer and
/// the number of boxes sold before this purchase.
pub fn purchase_seed(env: &Env, buyer: &Addr, total_minted: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(SEED_DOMAIN);
    hasher.update(env.block.height.to_be_bytes());
    hasher.update(env.block.time.nanos().to_be_bytes());
    hasher.update(env.block.chain_id.as_bytes());
    if let Some(tx) = &env.transaction {
        hasher.update(tx.index.to_be_bytes());
    }
    hasher.update(buyer.as_bytes());
    hasher.update(total_minted.to_be_bytes());
    hasher.finalize().into()
}

fn slot_value(storage: &dyn Storage, slot: u32) -> Result<u32, ContractError> {
    Ok(POOL_SLOTS.may_load(storage, slot)?.unwrap_or(slot + 1))
}

fn pick_slot(seed: &[u8; 32], ordinal: u32, live: u32) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(ordinal.to_be_bytes());
    let digest = hasher.finalize();

    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(word) % u64::from(live)) as u32
}

/// Take one unused index out of the pool. The caller persists `pool`.
pub fn draw(
    storage: &mut dyn Storage,
    pool: &mut SalePool,
    seed: &[u8; 32],
    ordinal: u32,
) -> Result<u32, ContractError> {
    if pool.remaining == 0 {
        return Err(ContractError::SupplyExhausted {
            remaining: 0,
            requested: 1,
        });
    }

    let slot = pick_slot(seed, ordinal, pool.remaining);
    let last = pool.remaining - 1;
    let index = slot_value(storage, slot)?;

    if slot != last {
        let moved = slot_value(storage, last)?;
        POOL_SLOTS.save(storage, slot, &moved)?;
    }
    POOL_SLOTS.remove(storage, last);
    pool.remaining = last;

    Ok(index)
}

/// Whether `index` has been bound to a token. Out-of-range indices never are.
pub fn is_used(storage: &dyn Storage, index: u32) -> bool {
    ALLOCATED.has(storage, index)
}
