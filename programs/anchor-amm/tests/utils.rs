// Test utilities for AMM program

#![allow(dead_code)]

use anchor_lang::{AccountDeserialize, InstructionData};
use litesvm::{types::TransactionResult, LiteSVM};
use litesvm_token::{get_spl_account, CreateAssociatedTokenAccount, CreateMint, MintTo};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;

use anchor_amm::{pda::PoolAddresses, state::Config};

// Program ID matching declare_id! (anchor_amm)
pub const AMM_PROGRAM_ID: Pubkey = Pubkey::new_from_array(anchor_amm::ID.to_bytes());

// Standard program IDs
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
use solana_system_interface::program::ID as system_program;

// Token decimals
pub const DECIMALS: u8 = 6;

const PROGRAM_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../target/deploy/anchor_amm.so"
);

// Setup LiteSVM with AMM program
//
// Panics when the program binary has not been built with `cargo build-sbf`.
pub fn setup_svm() -> LiteSVM {
    let program_bytes = std::fs::read(PROGRAM_PATH).unwrap_or_else(|err| {
        panic!("Failed to read {}: {} (run `cargo build-sbf` first)", PROGRAM_PATH, err)
    });

    let mut svm = LiteSVM::new();
    let _ = svm.add_program(AMM_PROGRAM_ID, &program_bytes);
    svm
}

// Create and fund account
pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

pub fn create_mint(svm: &mut LiteSVM, authority: &Keypair) -> Pubkey {
    CreateMint::new(svm, authority)
        .authority(&authority.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Failed to create mint")
}

// Create the user's ATA for `mint` and mint `amount` into it
pub fn fund_token(
    svm: &mut LiteSVM,
    mint_authority: &Keypair,
    mint: &Pubkey,
    user: &Keypair,
    amount: u64,
) -> Pubkey {
    let ata = CreateAssociatedTokenAccount::new(svm, user, mint)
        .owner(&user.pubkey())
        .send()
        .expect("Failed to create ATA");

    if amount > 0 {
        MintTo::new(svm, mint_authority, mint, &ata, amount)
            .owner(mint_authority)
            .send()
            .expect("Failed to mint tokens");
    }

    ata
}

// Sign, send, and expire the blockhash so identical follow-up calls are not
// deduplicated by the runtime
pub fn send(svm: &mut LiteSVM, ix: Instruction, signer: &Keypair) -> TransactionResult {
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signer.pubkey()),
        &[signer],
        svm.latest_blockhash(),
    );
    let result = svm.send_transaction(tx);
    svm.expire_blockhash();
    result
}

// Assert the transaction failed with the given AmmError variant name
pub fn assert_amm_error(result: TransactionResult, code: &str) {
    match result {
        Ok(_) => panic!("Expected {} but transaction succeeded", code),
        Err(failure) => {
            let needle = format!("Error Code: {}.", code);
            assert!(
                failure.meta.logs.iter().any(|line| line.contains(&needle)),
                "Expected {}, got {:?}\nlogs: {:#?}",
                code,
                failure.err,
                failure.meta.logs
            );
        }
    }
}

pub fn token_balance(svm: &LiteSVM, account: &Pubkey) -> u64 {
    get_spl_account::<spl_token::state::Account>(svm, account)
        .map(|account| account.amount)
        .unwrap_or(0)
}

pub fn mint_supply(svm: &LiteSVM, mint: &Pubkey) -> u64 {
    get_spl_account::<spl_token::state::Mint>(svm, mint)
        .expect("Mint should exist")
        .supply
}

// Type bridges between the program's and the SDK's pubkey types
pub fn to_program_key(key: &Pubkey) -> anchor_lang::prelude::Pubkey {
    anchor_lang::prelude::Pubkey::new_from_array(key.to_bytes())
}

pub fn to_sdk_key(key: &anchor_lang::prelude::Pubkey) -> Pubkey {
    Pubkey::new_from_array(key.to_bytes())
}

// Pool addresses derived by the program's own derivation, in SDK types
#[derive(Debug, Clone, Copy)]
pub struct TestPool {
    pub seed: u64,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub config: Pubkey,
    pub mint_lp: Pubkey,
    pub vault_x: Pubkey,
    pub vault_y: Pubkey,
}

impl TestPool {
    pub fn new(seed: u64, mint_x: &Pubkey, mint_y: &Pubkey) -> Self {
        let addresses =
            PoolAddresses::derive(seed, &to_program_key(mint_x), &to_program_key(mint_y));

        Self {
            seed,
            mint_x: *mint_x,
            mint_y: *mint_y,
            config: to_sdk_key(&addresses.config),
            mint_lp: to_sdk_key(&addresses.mint_lp),
            vault_x: to_sdk_key(&addresses.vault_x),
            vault_y: to_sdk_key(&addresses.vault_y),
        }
    }

    pub fn user_x(&self, user: &Pubkey) -> Pubkey {
        get_associated_token_address(user, &self.mint_x)
    }

    pub fn user_y(&self, user: &Pubkey) -> Pubkey {
        get_associated_token_address(user, &self.mint_y)
    }

    pub fn user_lp(&self, user: &Pubkey) -> Pubkey {
        get_associated_token_address(user, &self.mint_lp)
    }

    pub fn vault_balances(&self, svm: &LiteSVM) -> (u64, u64) {
        (token_balance(svm, &self.vault_x), token_balance(svm, &self.vault_y))
    }

    pub fn lp_supply(&self, svm: &LiteSVM) -> u64 {
        mint_supply(svm, &self.mint_lp)
    }

    pub fn read_config(&self, svm: &LiteSVM) -> Config {
        let account = svm
            .get_account(&self.config)
            .expect("Config account should exist");
        Config::try_deserialize(&mut account.data.as_slice()).expect("Config should deserialize")
    }
}

// Everything a test needs: a funded admin who owns both mints and an
// initialized pool
pub struct PoolFixture {
    pub svm: LiteSVM,
    pub admin: Keypair,
    pub pool: TestPool,
}

impl PoolFixture {
    pub fn new(seed: u64, fee: u16) -> Self {
        let mut svm = setup_svm();
        let admin = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);

        let mint_x = create_mint(&mut svm, &admin);
        let mint_y = create_mint(&mut svm, &admin);
        let pool = TestPool::new(seed, &mint_x, &mint_y);

        let init_ix = build_initialize_ix(&admin.pubkey(), &pool, fee, Some(admin.pubkey()));
        let result = send(&mut svm, init_ix, &admin);
        assert!(result.is_ok(), "Pool initialization failed: {:?}", result.err());

        Self { svm, admin, pool }
    }

    // Funded user holding both pool tokens
    pub fn user(&mut self, amount_x: u64, amount_y: u64) -> Keypair {
        let user = create_funded_account(&mut self.svm, 10 * LAMPORTS_PER_SOL);
        fund_token(&mut self.svm, &self.admin, &self.pool.mint_x, &user, amount_x);
        fund_token(&mut self.svm, &self.admin, &self.pool.mint_y, &user, amount_y);
        user
    }

    pub fn deposit(&mut self, user: &Keypair, max_x: u64, max_y: u64, min_lp: u64) -> TransactionResult {
        let ix = build_deposit_ix(&user.pubkey(), &self.pool, max_x, max_y, min_lp);
        send(&mut self.svm, ix, user)
    }

    pub fn withdraw(&mut self, user: &Keypair, amount: u64, min_x: u64, min_y: u64) -> TransactionResult {
        let ix = build_withdraw_ix(&user.pubkey(), &self.pool, amount, min_x, min_y);
        send(&mut self.svm, ix, user)
    }

    pub fn swap(&mut self, user: &Keypair, is_x: bool, amount_in: u64, min_out: u64) -> TransactionResult {
        let ix = build_swap_ix(&user.pubkey(), &self.pool, is_x, amount_in, min_out);
        send(&mut self.svm, ix, user)
    }
}

// Build initialize instruction
pub fn build_initialize_ix(
    initializer: &Pubkey,
    pool: &TestPool,
    fee: u16,
    authority: Option<Pubkey>,
) -> Instruction {
    let data = anchor_amm::instruction::Initialize {
        seed: pool.seed,
        fee,
        authority: authority.as_ref().map(to_program_key),
    }
    .data();

    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*initializer, true),
            AccountMeta::new_readonly(pool.mint_x, false),
            AccountMeta::new_readonly(pool.mint_y, false),
            AccountMeta::new(pool.config, false),
            AccountMeta::new(pool.mint_lp, false),
            AccountMeta::new(pool.vault_x, false),
            AccountMeta::new(pool.vault_y, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

// Build deposit instruction
pub fn build_deposit_ix(
    user: &Pubkey,
    pool: &TestPool,
    max_x: u64,
    max_y: u64,
    min_lp: u64,
) -> Instruction {
    let data = anchor_amm::instruction::Deposit {
        max_x,
        max_y,
        min_lp,
    }
    .data();

    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(pool.mint_x, false),
            AccountMeta::new_readonly(pool.mint_y, false),
            AccountMeta::new_readonly(pool.config, false),
            AccountMeta::new(pool.mint_lp, false),
            AccountMeta::new(pool.vault_x, false),
            AccountMeta::new(pool.vault_y, false),
            AccountMeta::new(pool.user_x(user), false),
            AccountMeta::new(pool.user_y(user), false),
            AccountMeta::new(pool.user_lp(user), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

// Build withdraw instruction
pub fn build_withdraw_ix(
    user: &Pubkey,
    pool: &TestPool,
    amount: u64,
    min_x: u64,
    min_y: u64,
) -> Instruction {
    let data = anchor_amm::instruction::Withdraw {
        amount,
        min_x,
        min_y,
    }
    .data();

    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(pool.mint_x, false),
            AccountMeta::new_readonly(pool.mint_y, false),
            AccountMeta::new_readonly(pool.config, false),
            AccountMeta::new(pool.mint_lp, false),
            AccountMeta::new(pool.vault_x, false),
            AccountMeta::new(pool.vault_y, false),
            AccountMeta::new(pool.user_x(user), false),
            AccountMeta::new(pool.user_y(user), false),
            AccountMeta::new(pool.user_lp(user), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

// Build swap instruction
pub fn build_swap_ix(
    user: &Pubkey,
    pool: &TestPool,
    is_x: bool,
    amount_in: u64,
    min_out: u64,
) -> Instruction {
    let data = anchor_amm::instruction::Swap {
        is_x,
        amount_in,
        min_out,
    }
    .data();

    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(pool.mint_x, false),
            AccountMeta::new_readonly(pool.mint_y, false),
            AccountMeta::new_readonly(pool.config, false),
            AccountMeta::new(pool.vault_x, false),
            AccountMeta::new(pool.vault_y, false),
            AccountMeta::new(pool.user_x(user), false),
            AccountMeta::new(pool.user_y(user), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

fn admin_accounts(authority: &Pubkey, pool: &TestPool) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(pool.config, false),
    ]
}

// Build lock_pool instruction
pub fn build_lock_pool_ix(authority: &Pubkey, pool: &TestPool) -> Instruction {
    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: admin_accounts(authority, pool),
        data: anchor_amm::instruction::LockPool {}.data(),
    }
}

// Build unlock_pool instruction
pub fn build_unlock_pool_ix(authority: &Pubkey, pool: &TestPool) -> Instruction {
    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: admin_accounts(authority, pool),
        data: anchor_amm::instruction::UnlockPool {}.data(),
    }
}

// Build set_authority instruction
pub fn build_set_authority_ix(
    authority: &Pubkey,
    pool: &TestPool,
    new_authority: Option<Pubkey>,
) -> Instruction {
    let data = anchor_amm::instruction::SetAuthority {
        new_authority: new_authority.as_ref().map(to_program_key),
    }
    .data();

    Instruction {
        program_id: AMM_PROGRAM_ID,
        accounts: admin_accounts(authority, pool),
        data,
    }
}
