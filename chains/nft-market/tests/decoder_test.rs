use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use nft_market::{BatchReceipt, EventKind, LogEntry, TxStatus, decode};

fn id_topic(id: u64) -> B256 {
    B256::from(U256::from(id).to_be_bytes::<32>())
}

fn created(kind: EventKind, id: u64) -> LogEntry {
    LogEntry {
        address: Address::repeat_byte(0x22),
        topics: vec![
            kind.signature_hash(),
            Address::repeat_byte(0xaa).into_word(),
            Address::repeat_byte(0xc0).into_word(),
            id_topic(id),
        ],
        data: Bytes::from(vec![0u8; 96]),
    }
}

fn approval(id: u64) -> LogEntry {
    LogEntry {
        address: Address::repeat_byte(0xc0),
        topics: vec![
            keccak256("Approval(address,address,uint256)"),
            Address::repeat_byte(0xaa).into_word(),
            Address::repeat_byte(0x22).into_word(),
            id_topic(id),
        ],
        data: Bytes::new(),
    }
}

fn receipt(logs: Vec<LogEntry>) -> BatchReceipt {
    BatchReceipt {
        hash: B256::repeat_byte(0x01),
        status: TxStatus::Success,
        logs,
    }
}

#[test]
fn test_decode_preserves_log_order() {
    let ids = [42u64, 7, 1_000_000, 3];
    let logs = ids
        .iter()
        .flat_map(|&id| [approval(id + 1), created(EventKind::DutchAuctionCreated, id)])
        .collect();

    let decoded = decode(&receipt(logs), EventKind::DutchAuctionCreated);

    let expected: Vec<U256> = ids.iter().map(|&id| U256::from(id)).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_decode_empty_receipt() {
    assert!(decode(&receipt(vec![]), EventKind::AuctionCreated).is_empty());
}

#[test]
fn test_decode_ignores_other_creation_events() {
    let logs = vec![
        created(EventKind::ListingCreated, 1),
        created(EventKind::AuctionCreated, 2),
        created(EventKind::DutchAuctionCreated, 3),
        created(EventKind::ListingCreated, 4),
    ];
    let receipt = receipt(logs);

    assert_eq!(
        decode(&receipt, EventKind::ListingCreated),
        vec![U256::from(1), U256::from(4)]
    );
    assert_eq!(decode(&receipt, EventKind::AuctionCreated), vec![U256::from(2)]);
}

#[test]
fn test_decode_never_yields_more_ids_than_logs() {
    let mut logs: Vec<LogEntry> = (0..10).map(approval).collect();
    logs.extend((0..5).map(|i| created(EventKind::AuctionCreated, i)));
    // Signature matches but the indexed id is missing
    logs.push(LogEntry {
        address: Address::ZERO,
        topics: vec![EventKind::AuctionCreated.signature_hash()],
        data: Bytes::new(),
    });
    let receipt = receipt(logs);

    let decoded = decode(&receipt, EventKind::AuctionCreated);
    assert_eq!(decoded.len(), 5);
    assert!(decoded.len() <= receipt.logs.len());
}

#[test]
fn test_large_identifiers_survive() {
    let big = U256::MAX - U256::from(1);
    let mut log = created(EventKind::ListingCreated, 0);
    log.topics[3] = B256::from(big.to_be_bytes::<32>());

    assert_eq!(decode(&receipt(vec![log]), EventKind::ListingCreated), vec![big]);
}
