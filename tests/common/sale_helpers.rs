/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Sale Helpers
//!
//! Sets up a sale with an AMM pool ready to be seeded and wraps every
//! instruction of the program in a one-call helper.

use borsh::BorshDeserialize;
use solana_program::{instruction::InstructionError, program_pack::Pack, pubkey::Pubkey, system_program};
use solana_program_test::{BanksClient, BanksClientError, ProgramTestBanksClientExt};
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::Instruction,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};
use spl_token::state::{Account as TokenAccount, Mint as MintAccount};
use token_crowdsale::{
    client_sdk::{AmmPoolAccounts, SaleAddresses, SaleClient, SaleConfig},
    constants::amm_program,
    error::SaleError,
    state::{ContributionRecord, SaleRecord},
};

use crate::common::mock_amm::MockPoolState;
use crate::common::setup::{create_program_test, init_logging};
use crate::common::{constants, PROGRAM_ID};

/// Parameters of the sale created by `setup_sale`
#[derive(Debug, Clone)]
pub struct SaleTestOptions {
    pub name: String,
    pub ticker: String,
    pub total_supply: u64,
    pub target: u64,
    pub fee_rate_bps: u16,
    pub decimals: u8,
    /// Makes the mock AMM reject pool creation
    pub pool_already_initialized: bool,
}

impl Default for SaleTestOptions {
    fn default() -> Self {
        Self {
            name: "Pump Token".to_string(),
            ticker: "PUMP".to_string(),
            total_supply: constants::SCENARIO_SUPPLY,
            target: constants::SCENARIO_TARGET,
            fee_rate_bps: constants::SCENARIO_FEE_BPS,
            decimals: 6,
            pool_already_initialized: false,
        }
    }
}

/// A created sale plus everything needed to drive it
pub struct SaleTestContext {
    pub banks_client: BanksClient,
    pub payer: Keypair,
    pub recent_blockhash: Hash,
    pub client: SaleClient,
    pub creator: Keypair,
    pub fee_destination: Pubkey,
    pub ticker: String,
    pub addresses: SaleAddresses,
    pub amm: AmmPoolAccounts,
}

/// Starts the program test and creates a sale described by `options`.
pub async fn setup_sale(options: SaleTestOptions) -> SaleTestContext {
    init_logging();
    let mut program_test = create_program_test();

    let creator = Keypair::new();
    let fee_destination = Pubkey::new_unique();
    let amm_pool = Pubkey::new_unique();
    program_test.add_account(
        creator.pubkey(),
        Account::new(constants::DEFAULT_SOL_AIRDROP, 0, &system_program::id()),
    );
    program_test.add_account(
        fee_destination,
        Account::new(1_000_000_000, 0, &system_program::id()),
    );
    let mut pool_data = vec![0u8; MockPoolState::LEN];
    if options.pool_already_initialized {
        pool_data[0] = 1;
    }
    program_test.add_account(
        amm_pool,
        Account {
            lamports: 10_000_000,
            data: pool_data,
            owner: amm_program::id(),
            executable: false,
            rent_epoch: 0,
        },
    );

    let (banks_client, payer, recent_blockhash) = program_test.start().await;
    let client = SaleClient::new(PROGRAM_ID);
    let addresses = client.derive_sale_addresses(&creator.pubkey(), &options.ticker);
    let mut ctx = SaleTestContext {
        banks_client,
        payer,
        recent_blockhash,
        client,
        creator,
        fee_destination,
        ticker: options.ticker.clone(),
        addresses,
        amm: AmmPoolAccounts {
            pool: amm_pool,
            token_vault: Pubkey::default(),
        },
    };

    let config = SaleConfig::new(
        &options.name,
        &options.ticker,
        options.total_supply,
        options.target,
        options.fee_rate_bps,
        options.decimals,
    )
    .expect("valid sale config");
    let create_ix = ctx
        .client
        .create_sale_instruction(&ctx.creator.pubkey(), &ctx.fee_destination, &config)
        .expect("create sale instruction");
    let tx = Transaction::new_signed_with_payer(
        &[create_ix],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer, &ctx.creator],
        ctx.recent_blockhash,
    );
    ctx.banks_client
        .process_transaction(tx)
        .await
        .expect("sale creation should succeed");

    let amm_pool = ctx.amm.pool;
    ctx.amm.token_vault = ctx.create_token_account(&amm_pool).await;
    ctx
}

impl SaleTestContext {
    /// Processes `instructions` with the payer plus `signers`.
    pub async fn process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let mut all_signers: Vec<&Keypair> = vec![&self.payer];
        all_signers.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            &all_signers,
            self.recent_blockhash,
        );
        self.banks_client.process_transaction(tx).await
    }

    /// Creates a token account of the sale mint owned by `owner`.
    pub async fn create_token_account(&mut self, owner: &Pubkey) -> Pubkey {
        let account = Keypair::new();
        let rent = self.banks_client.get_rent().await.expect("rent");
        let instructions = [
            system_instruction::create_account(
                &self.payer.pubkey(),
                &account.pubkey(),
                rent.minimum_balance(TokenAccount::LEN),
                TokenAccount::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_account3(
                &spl_token::id(),
                &account.pubkey(),
                &self.addresses.mint,
                owner,
            )
            .expect("initialize token account instruction"),
        ];
        self.process(&instructions, &[&account])
            .await
            .expect("token account creation should succeed");
        account.pubkey()
    }

    /// Moves to a new blockhash so an identical transaction can be resent.
    pub async fn refresh_blockhash(&mut self) {
        self.recent_blockhash = self
            .banks_client
            .get_new_latest_blockhash(&self.recent_blockhash)
            .await
            .expect("new blockhash");
    }

    /// Creates a system account holding `lamports`.
    pub async fn fund_user(&mut self, lamports: u64) -> Keypair {
        let user = Keypair::new();
        let ix = system_instruction::transfer(&self.payer.pubkey(), &user.pubkey(), lamports);
        self.process(&[ix], &[]).await.expect("funding should succeed");
        user
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> u64 {
        self.banks_client
            .get_account(*address)
            .await
            .expect("get account")
            .map(|account| account.lamports)
            .unwrap_or(0)
    }

    pub async fn get_sale(&mut self) -> SaleRecord {
        let account = self
            .banks_client
            .get_account(self.addresses.sale)
            .await
            .expect("get account")
            .expect("sale account exists");
        SaleRecord::deserialize(&mut &account.data[..]).expect("sale record")
    }

    pub fn contribution_address(&self, contributor: &Pubkey, index: u32) -> Pubkey {
        self.client
            .derive_contribution_address(contributor, &self.addresses.sale, &self.ticker, index)
    }

    pub async fn get_contribution(&mut self, contributor: &Pubkey, index: u32) -> Option<ContributionRecord> {
        let address = self.contribution_address(contributor, index);
        let account = self.banks_client.get_account(address).await.expect("get account")?;
        Some(ContributionRecord::deserialize(&mut &account.data[..]).expect("contribution record"))
    }

    /// Treasury lamports above the rent reserve.
    pub async fn escrow_balance(&mut self) -> u64 {
        let reserve = self.get_sale().await.treasury_rent_reserve;
        let treasury = self.addresses.treasury;
        self.lamports(&treasury).await - reserve
    }

    pub async fn token_balance(&mut self, token_account: &Pubkey) -> u64 {
        let account = self
            .banks_client
            .get_account(*token_account)
            .await
            .expect("get account")
            .expect("token account exists");
        TokenAccount::unpack(&account.data).expect("token account").amount
    }

    pub async fn mint_supply(&mut self) -> u64 {
        let mint = self.addresses.mint;
        let account = self
            .banks_client
            .get_account(mint)
            .await
            .expect("get account")
            .expect("mint exists");
        MintAccount::unpack(&account.data).expect("mint").supply
    }

    pub async fn get_mock_pool(&mut self) -> MockPoolState {
        let account = self
            .banks_client
            .get_account(self.amm.pool)
            .await
            .expect("get account")
            .expect("pool exists");
        MockPoolState::deserialize(&mut &account.data[..]).expect("pool state")
    }

    /// Contributes at the sale's current index and returns that index.
    pub async fn contribute(&mut self, contributor: &Keypair, amount: u64) -> Result<u32, BanksClientError> {
        let index = self.get_sale().await.contribution_count;
        self.contribute_at(contributor, index, amount).await?;
        Ok(index)
    }

    /// Contributes with an explicit ledger index, stale or not.
    pub async fn contribute_at(
        &mut self,
        contributor: &Keypair,
        index: u32,
        amount: u64,
    ) -> Result<(), BanksClientError> {
        let ix = self
            .client
            .contribute_instruction(&contributor.pubkey(), &self.creator.pubkey(), &self.ticker, index, amount)
            .expect("contribute instruction");
        self.process(&[ix], &[contributor]).await
    }

    /// Contributes as the sale creator, which is required for ledger entry #0.
    pub async fn creator_contribute(&mut self, amount: u64) -> Result<u32, BanksClientError> {
        let index = self.get_sale().await.contribution_count;
        let ix = self
            .client
            .contribute_instruction(&self.creator.pubkey(), &self.creator.pubkey(), &self.ticker, index, amount)
            .expect("contribute instruction");
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer.pubkey()),
            &[&self.payer, &self.creator],
            self.recent_blockhash,
        );
        self.banks_client.process_transaction(tx).await?;
        Ok(index)
    }

    pub async fn creator_refund(&mut self, index: u32) -> Result<(), BanksClientError> {
        let ix = self
            .client
            .refund_instruction(&self.creator.pubkey(), &self.creator.pubkey(), &self.ticker, index)
            .expect("refund instruction");
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer.pubkey()),
            &[&self.payer, &self.creator],
            self.recent_blockhash,
        );
        self.banks_client.process_transaction(tx).await
    }

    pub async fn claim(
        &mut self,
        contributor: &Keypair,
        index: u32,
        destination: &Pubkey,
    ) -> Result<(), BanksClientError> {
        let ix = self
            .client
            .claim_tokens_instruction(&contributor.pubkey(), &self.creator.pubkey(), &self.ticker, index, destination)
            .expect("claim instruction");
        self.process(&[ix], &[contributor]).await
    }

    pub async fn refund(&mut self, contributor: &Keypair, index: u32) -> Result<(), BanksClientError> {
        let ix = self
            .client
            .refund_instruction(&contributor.pubkey(), &self.creator.pubkey(), &self.ticker, index)
            .expect("refund instruction");
        self.process(&[ix], &[contributor]).await
    }

    pub fn finalize_instruction(&self, consumed_records: &[Pubkey]) -> Instruction {
        self.client
            .finalize_instruction(
                &self.payer.pubkey(),
                &self.creator.pubkey(),
                &self.ticker,
                &self.fee_destination,
                &self.amm,
                consumed_records,
            )
            .expect("finalize instruction")
    }

    pub async fn finalize(&mut self, consumed_records: &[Pubkey]) -> Result<(), BanksClientError> {
        let ix = self.finalize_instruction(consumed_records);
        self.process(&[ix], &[]).await
    }
}

/// Asserts that `result` failed with the custom program error `expected`.
pub fn assert_sale_error<T: std::fmt::Debug>(result: Result<T, BanksClientError>, expected: SaleError) {
    match result {
        Err(err) => match err.unwrap() {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                assert_eq!(
                    code,
                    expected as u32,
                    "expected {:?} ({}), got code {}",
                    expected,
                    expected as u32,
                    code
                );
            }
            other => panic!("expected {:?}, got {:?}", expected, other),
        },
        Ok(value) => panic!("expected {:?}, but the transaction succeeded: {:?}", expected, value),
    }
}

/// Asserts that `result` failed with the built-in instruction error `expected`.
pub fn assert_instruction_error<T: std::fmt::Debug>(
    result: Result<T, BanksClientError>,
    expected: InstructionError,
) {
    match result {
        Err(err) => match err.unwrap() {
            TransactionError::InstructionError(_, actual) => assert_eq!(actual, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        },
        Ok(value) => panic!("expected {:?}, but the transaction succeeded: {:?}", expected, value),
    }
}
