use binlens::{PackedIds, U256};
use binlens_program::{pack_book, BookBin, BookShare};
use solana_program::{hash::Hash, instruction::Instruction, pubkey::Pubkey};
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    account::Account,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

#[tokio::test]
async fn test_populated_ids() {
    // Setup
    let book = Pubkey::new_unique();
    let (mut banks, payer, blockhash) = setup_program_test_env(book).await;

    // Should fail
    let tx = build_tx(&payer, binlens_program::populated_ids(book, 1 << 24, 0, 0), blockhash);
    assert!(banks.process_transaction(tx).await.is_err());

    // Should succeed
    let tx = build_tx(&payer, binlens_program::populated_ids(book, 0, 100, 0), blockhash);
    let result = banks.simulate_transaction(tx).await.unwrap();
    assert!(result.result.unwrap().is_ok());

    let return_data = result
        .simulation_details
        .and_then(|details| details.return_data)
        .unwrap();
    assert_eq!(return_data.program_id, binlens_program::id());
    let ids: Vec<u32> = PackedIds::try_from_bytes(return_data.data)
        .unwrap()
        .iter()
        .map(|id| id.get())
        .collect();
    assert_eq!(ids, vec![3, 7, 42]);
}

#[tokio::test]
async fn test_reserves_of() {
    let book = Pubkey::new_unique();
    let (mut banks, payer, blockhash) = setup_program_test_env(book).await;

    let ix = binlens_program::reserves_of(book, holder(), None, 10, 10);
    let tx = build_tx(&payer, ix, blockhash);
    assert!(banks.process_transaction(tx).await.is_ok());

    // Missing book account
    let mut ix = binlens_program::reserves_of(book, holder(), Some(7), 1, 1);
    ix.accounts.clear();
    let tx = build_tx(&payer, ix, blockhash);
    assert!(banks.process_transaction(tx).await.is_err());
}

fn holder() -> Pubkey {
    Pubkey::new_from_array([7; 32])
}

fn build_tx(payer: &Keypair, ix: Instruction, blockhash: Hash) -> Transaction {
    Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[&payer], blockhash)
}

async fn setup_program_test_env(book: Pubkey) -> (BanksClient, Keypair, Hash) {
    let mut program_test = ProgramTest::new(
        "binlens_program",
        binlens_program::id(),
        processor!(binlens_program::process_instruction),
    );
    let bins = [
        BookBin::new(3, 10, 0, U256::from(10)),
        BookBin::new(7, 5, 5, U256::from(4)),
        BookBin::new(42, 0, 8, U256::from(1)),
    ];
    let shares = [
        BookShare::new(holder(), 3, U256::from(2)),
        BookShare::new(holder(), 42, U256::from(1)),
    ];
    program_test.add_account(
        book,
        Account {
            lamports: 1_000_000_000,
            data: pack_book(7, &bins, &shares),
            owner: binlens_program::id(),
            executable: false,
            rent_epoch: 0,
        },
    );
    program_test.start().await
}
