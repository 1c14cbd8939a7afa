//! Response models for the Koios operations this crate exposes.
//!
//! Field names and nullability mirror the Koios OpenAPI schemas. Amounts are
//! lovelace quantities and arrive as decimal strings (they can exceed
//! `u64`); timestamps are UNIX seconds, with [`chrono`] helpers on the types
//! that carry them. Endpoints not covered here can be reached through
//! [`KoiosClient::get`] and [`KoiosClient::post`] with caller-supplied
//! models.
//!
//! [`KoiosClient::get`]: crate::KoiosClient::get
//! [`KoiosClient::post`]: crate::KoiosClient::post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The tip of the chain, as reported by `/tip`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tip {
    /// Block hash at the tip.
    pub hash: String,
    /// Epoch number.
    pub epoch_no: u64,
    /// Absolute slot number.
    pub abs_slot: u64,
    /// Slot number within the epoch.
    pub epoch_slot: u64,
    /// Block height.
    pub block_no: u64,
    /// UNIX timestamp of the block.
    pub block_time: i64,
}

impl Tip {
    /// Block timestamp as a [`DateTime`], if representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.block_time, 0)
    }
}

/// Genesis parameters of the network, from `/genesis`.
///
/// Koios serves every numeric genesis value as a string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genesis {
    /// Network magic number.
    pub networkmagic: String,
    /// Network identifier (`Mainnet` or `Testnet`).
    pub networkid: String,
    /// Epoch length in slots.
    pub epochlength: String,
    /// Slot length in seconds.
    pub slotlength: String,
    /// Maximum lovelace supply.
    pub maxlovelacesupply: String,
    /// UNIX timestamp of the first block.
    pub systemstart: i64,
    /// Active slot coefficient.
    pub activeslotcoeff: String,
    /// Slots per KES period.
    pub slotsperkesperiod: String,
    /// Maximum KES key evolutions.
    pub maxkesrevolutions: String,
    /// Security parameter k.
    pub securityparam: String,
    /// Update quorum.
    pub updatequorum: String,
    /// Alonzo genesis blob, as JSON text.
    pub alonzogenesis: Option<String>,
}

impl Genesis {
    /// System start as a [`DateTime`], if representable.
    pub fn system_start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.systemstart, 0)
    }
}

/// Supply figures for an epoch, from `/totals`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Totals {
    /// Epoch number.
    pub epoch_no: u64,
    /// Circulating UTxO supply, in lovelace.
    pub circulation: String,
    /// Treasury balance, in lovelace.
    pub treasury: String,
    /// Unclaimed rewards, in lovelace.
    pub reward: String,
    /// Total supply, in lovelace.
    pub supply: String,
    /// Reserves, in lovelace.
    pub reserves: String,
}

/// Summary of an epoch, from `/epoch_info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpochInfo {
    /// Epoch number.
    pub epoch_no: u64,
    /// Total output of all transactions, in lovelace.
    pub out_sum: String,
    /// Total fees, in lovelace.
    pub fees: String,
    /// Number of transactions.
    pub tx_count: u64,
    /// Number of blocks.
    pub blk_count: u64,
    /// UNIX timestamp of the epoch start.
    pub start_time: i64,
    /// UNIX timestamp of the epoch end.
    pub end_time: i64,
    /// UNIX timestamp of the first block, absent for a just-started epoch.
    pub first_block_time: Option<i64>,
    /// UNIX timestamp of the last block, absent for a just-started epoch.
    pub last_block_time: Option<i64>,
    /// Stake active in the epoch, in lovelace. Absent while not yet computed.
    pub active_stake: Option<String>,
    /// Rewards earned in the epoch, in lovelace. Absent while not yet computed.
    pub total_rewards: Option<String>,
    /// Average block reward, in lovelace. Absent while not yet computed.
    pub avg_blk_reward: Option<String>,
}

/// Summary of a block, from `/blocks`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    /// Block hash.
    pub hash: String,
    /// Epoch number.
    pub epoch_no: u64,
    /// Absolute slot number.
    pub abs_slot: u64,
    /// Slot number within the epoch.
    pub epoch_slot: u64,
    /// Block height.
    pub block_height: Option<u64>,
    /// Block size in bytes.
    pub block_size: u64,
    /// UNIX timestamp of the block.
    pub block_time: i64,
    /// Number of transactions in the block.
    pub tx_count: u64,
    /// VRF verification key of the producing pool.
    pub vrf_key: String,
    /// Bech32 pool ID of the producer, absent for pre-Shelley blocks.
    pub pool: Option<String>,
    /// Protocol major version.
    pub proto_major: u64,
    /// Protocol minor version.
    pub proto_minor: u64,
    /// Operational certificate counter.
    pub op_cert_counter: u64,
}

impl Block {
    /// Block timestamp as a [`DateTime`], if representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.block_time, 0)
    }
}

/// Detailed information on a block, from `/block_info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block hash.
    pub hash: String,
    /// Epoch number.
    pub epoch_no: u64,
    /// Absolute slot number.
    pub abs_slot: u64,
    /// Slot number within the epoch.
    pub epoch_slot: u64,
    /// Block height.
    pub block_height: Option<u64>,
    /// Block size in bytes.
    pub block_size: u64,
    /// UNIX timestamp of the block.
    pub block_time: i64,
    /// Number of transactions in the block.
    pub tx_count: u64,
    /// VRF verification key of the producing pool.
    pub vrf_key: String,
    /// Operational certificate hash.
    pub op_cert: String,
    /// Operational certificate counter.
    pub op_cert_counter: u64,
    /// Bech32 pool ID of the producer.
    pub pool: Option<String>,
    /// Protocol major version.
    pub proto_major: u64,
    /// Protocol minor version.
    pub proto_minor: u64,
    /// Total output of the block's transactions, in lovelace.
    pub total_output: Option<String>,
    /// Total fees of the block's transactions, in lovelace.
    pub total_fees: Option<String>,
    /// Confirmations at the time of the query.
    pub num_confirmations: u64,
    /// Hash of the parent block.
    pub parent_hash: Option<String>,
    /// Hash of the child block, absent at the tip.
    pub child_hash: Option<String>,
}

/// A native asset attached to a UTxO.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    /// Minting policy ID, hex.
    pub policy_id: String,
    /// Asset name, hex. Absent for the empty name.
    pub asset_name: Option<String>,
    /// CIP-14 fingerprint.
    pub fingerprint: String,
    /// Declared decimal places, if registered.
    pub decimals: Option<u32>,
    /// Quantity held, as a decimal string.
    pub quantity: String,
}

/// An unspent output owned by an address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Utxo {
    /// Hash of the creating transaction.
    pub tx_hash: String,
    /// Output index within that transaction.
    pub tx_index: u32,
    /// Lovelace value, as a decimal string.
    pub value: String,
    /// Hash of the attached datum, if any.
    pub datum_hash: Option<String>,
    /// Native assets on the output, when asset listing is enabled.
    pub asset_list: Option<Vec<Asset>>,
}

/// Balance and UTxO set of an address, from `/address_info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddressInfo {
    /// The queried address.
    pub address: String,
    /// Total lovelace balance, as a decimal string.
    pub balance: String,
    /// Stake address the payment address is associated with, if any.
    pub stake_address: Option<String>,
    /// Whether the address is a script address.
    pub script_address: bool,
    /// Unspent outputs held by the address.
    pub utxo_set: Vec<Utxo>,
}

/// Stake account summary, from `/account_info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Bech32 stake address.
    pub stake_address: String,
    /// Registration status (`registered` or `not registered`).
    pub status: String,
    /// Bech32 pool ID the account delegates to, if any.
    pub delegated_pool: Option<String>,
    /// Total balance (UTxO + rewards), in lovelace.
    pub total_balance: String,
    /// UTxO balance, in lovelace.
    pub utxo: String,
    /// Lifetime rewards earned, in lovelace.
    pub rewards: String,
    /// Lifetime withdrawals, in lovelace.
    pub withdrawals: String,
    /// Rewards available for withdrawal, in lovelace.
    pub rewards_available: String,
    /// Value moved to reserves, in lovelace.
    pub reserves: String,
    /// Value moved to treasury, in lovelace.
    pub treasury: String,
}

/// Core details of a transaction, from `/tx_info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TxInfo {
    /// Transaction hash.
    pub tx_hash: String,
    /// Hash of the containing block.
    pub block_hash: String,
    /// Height of the containing block.
    pub block_height: Option<u64>,
    /// Epoch number.
    pub epoch_no: u64,
    /// Slot within the epoch.
    pub epoch_slot: u64,
    /// Absolute slot number.
    pub absolute_slot: u64,
    /// UNIX timestamp of the containing block.
    pub tx_timestamp: i64,
    /// Index of the transaction within its block.
    pub tx_block_index: u64,
    /// Transaction size in bytes.
    pub tx_size: u64,
    /// Total output, in lovelace.
    pub total_output: String,
    /// Fee paid, in lovelace.
    pub fee: String,
    /// Deposit made (or refunded, negative), in lovelace.
    pub deposit: String,
    /// Validity interval start slot, if set.
    pub invalid_before: Option<String>,
    /// Validity interval end slot, if set.
    pub invalid_after: Option<String>,
}

impl TxInfo {
    /// Containing block timestamp as a [`DateTime`], if representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.tx_timestamp, 0)
    }
}

/// Confirmation status of a transaction, from `/tx_status`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TxStatus {
    /// Transaction hash.
    pub tx_hash: String,
    /// Confirmation count; absent while the transaction is not on chain.
    pub num_confirmations: Option<u64>,
}

/// A registered stake pool, from `/pool_list`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolListItem {
    /// Bech32 pool ID.
    pub pool_id_bech32: String,
    /// Pool ticker, if declared in metadata.
    pub ticker: Option<String>,
    /// Registration status (`registered`, `retiring` or `retired`).
    pub pool_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_decodes_from_koios_payload() {
        let payload = r#"[{
            "hash": "4ea1ba291e8eef538635a53e59fddba7810d1679631cc3aed7c8e6c4091a516a",
            "epoch_no": 321,
            "abs_slot": 53384242,
            "epoch_slot": 75442,
            "block_no": 42,
            "block_time": 1506635091
        }]"#;
        let tips: Vec<Tip> = serde_json::from_str(payload).unwrap();
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].epoch_no, 321);
        assert_eq!(tips[0].time().unwrap().timestamp(), 1506635091);
    }

    #[test]
    fn tx_status_tolerates_unconfirmed_transactions() {
        let payload = r#"[{"tx_hash": "f144a8264a", "num_confirmations": null}]"#;
        let statuses: Vec<TxStatus> = serde_json::from_str(payload).unwrap();
        assert!(statuses[0].num_confirmations.is_none());
    }
}
