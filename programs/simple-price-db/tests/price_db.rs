use price_feed_common::encode_symbol;
use simple_price_db::{decode_record, instruction, state::SimplePriceDb};
use solana_program_test::{processor, tokio, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use std_reference_basic::state::{Price, StdReference};

struct Accounts {
    price_db: Pubkey,
    reference: Pubkey,
}

fn reference_data(prices: &[Price]) -> Vec<u8> {
    let mut reference = StdReference::new(Pubkey::new_unique().to_bytes(), 4);
    reference.relay(prices).unwrap();
    borsh::to_vec(&reference).unwrap()
}

fn price(symbol: &str, rate: u64) -> Price {
    Price::new(encode_symbol(symbol).unwrap(), rate, 1_700_000_000, 77)
}

async fn start(reference_owner: Pubkey, prices: &[Price]) -> (ProgramTestContext, Accounts) {
    let mut program_test = ProgramTest::new(
        "simple_price_db",
        simple_price_db::id(),
        processor!(simple_price_db::processor::process_instruction),
    );
    program_test.add_program(
        "std_reference_basic",
        std_reference_basic::id(),
        processor!(std_reference_basic::processor::process_instruction),
    );

    let accounts = Accounts {
        price_db: Pubkey::new_unique(),
        reference: Pubkey::new_unique(),
    };
    program_test.add_account(
        accounts.price_db,
        Account {
            lamports: 1_000_000_000,
            data: vec![0u8; SimplePriceDb::SIZE],
            owner: simple_price_db::id(),
            ..Account::default()
        },
    );
    program_test.add_account(
        accounts.reference,
        Account {
            lamports: 1_000_000_000,
            data: reference_data(prices),
            owner: reference_owner,
            ..Account::default()
        },
    );

    let mut context = program_test.start_with_context().await;
    let owner = context.payer.pubkey();
    let ix = instruction::init(&simple_price_db::id(), &accounts.price_db, &owner);
    send(&mut context, ix, &[]).await.unwrap();

    (context, accounts)
}

async fn send(
    context: &mut ProgramTestContext,
    ix: Instruction,
    extra_signers: &[&Keypair],
) -> Result<(), TransactionError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let mut signers = vec![&context.payer];
    signers.extend_from_slice(extra_signers);
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&context.payer.pubkey()),
        signers.as_slice(),
        blockhash,
    );
    context
        .banks_client
        .process_transaction(tx)
        .await
        .map_err(|e| e.unwrap())
}

async fn account_data(context: &mut ProgramTestContext, key: Pubkey) -> Vec<u8> {
    context
        .banks_client
        .get_account(key)
        .await
        .unwrap()
        .expect("account must exist")
        .data
}

fn set_price_ix(context: &ProgramTestContext, accounts: &Accounts, symbol: &str) -> Instruction {
    instruction::set_price(
        &simple_price_db::id(),
        &accounts.price_db,
        &context.payer.pubkey(),
        &accounts.reference,
        symbol,
    )
    .unwrap()
}

#[tokio::test]
async fn init_records_owner_with_empty_price() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[]).await;

    let record = decode_record(&account_data(&mut context, accounts.price_db).await).unwrap();
    assert_eq!(record.owner_pubkey(), context.payer.pubkey());
    assert_eq!(record.latest_symbol, "");
    assert_eq!(record.latest_price, 0);
}

#[tokio::test]
async fn set_price_copies_rate_from_reference() {
    let (mut context, accounts) =
        start(std_reference_basic::id(), &[price("BTC", 1000), price("ETH", 250)]).await;

    let ix = set_price_ix(&context, &accounts, "ETH");
    send(&mut context, ix, &[]).await.unwrap();

    let record = decode_record(&account_data(&mut context, accounts.price_db).await).unwrap();
    assert_eq!(record.latest_symbol, "ETH");
    assert_eq!(record.latest_price, 250);

    let ix = set_price_ix(&context, &accounts, "BTC");
    send(&mut context, ix, &[]).await.unwrap();

    let data = account_data(&mut context, accounts.price_db).await;
    assert_eq!(&data[40..48], &[232, 3, 0, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn unknown_symbol_fails_with_code_115() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[price("BTC", 1)]).await;

    let ix = set_price_ix(&context, &accounts, "DOGE");
    assert_eq!(
        send(&mut context, ix, &[]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::Custom(115)
        ))
    );
}

#[tokio::test]
async fn empty_symbol_is_refused_on_chain() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[price("BTC", 1)]).await;

    // bypasses the builder, which refuses "" before it reaches the chain
    let mut ix = set_price_ix(&context, &accounts, "BTC");
    ix.data = instruction::encode_set_symbol("").unwrap();
    assert_eq!(
        send(&mut context, ix, &[]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::Custom(118)
        ))
    );
}

#[tokio::test]
async fn rate_beyond_i64_is_refused() {
    let (mut context, accounts) =
        start(std_reference_basic::id(), &[price("BIG", u64::MAX)]).await;

    let ix = set_price_ix(&context, &accounts, "BIG");
    assert_eq!(
        send(&mut context, ix, &[]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::Custom(120)
        ))
    );
}

#[tokio::test]
async fn reference_must_belong_to_reference_program() {
    let (mut context, accounts) = start(Pubkey::new_unique(), &[price("BTC", 1)]).await;

    let ix = set_price_ix(&context, &accounts, "BTC");
    assert_eq!(
        send(&mut context, ix, &[]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::IncorrectProgramId
        ))
    );
}

#[tokio::test]
async fn only_owner_may_set_price() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[price("BTC", 1)]).await;
    let intruder = Keypair::new();

    let ix = instruction::set_price(
        &simple_price_db::id(),
        &accounts.price_db,
        &intruder.pubkey(),
        &accounts.reference,
        "BTC",
    )
    .unwrap();
    assert_eq!(
        send(&mut context, ix, &[&intruder]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::Custom(112)
        ))
    );
}

#[tokio::test]
async fn transfer_ownership_moves_the_record() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[price("BTC", 1)]).await;
    let new_owner = Keypair::new();

    let ix = instruction::transfer_ownership(
        &simple_price_db::id(),
        &accounts.price_db,
        &context.payer.pubkey(),
        &new_owner.pubkey(),
    );
    send(&mut context, ix, &[]).await.unwrap();

    let record = decode_record(&account_data(&mut context, accounts.price_db).await).unwrap();
    assert_eq!(record.owner_pubkey(), new_owner.pubkey());

    let ix = instruction::set_price(
        &simple_price_db::id(),
        &accounts.price_db,
        &new_owner.pubkey(),
        &accounts.reference,
        "BTC",
    )
    .unwrap();
    send(&mut context, ix, &[&new_owner]).await.unwrap();
}

#[tokio::test]
async fn init_twice_fails() {
    let (mut context, accounts) = start(std_reference_basic::id(), &[]).await;

    let ix = instruction::init(
        &simple_price_db::id(),
        &accounts.price_db,
        &Pubkey::new_unique(),
    );
    assert_eq!(
        send(&mut context, ix, &[]).await,
        Err(TransactionError::InstructionError(
            0,
            InstructionError::AccountAlreadyInitialized
        ))
    );
}
