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

//! # Test Environment Setup Utilities
//!
//! Builds the program test with the crowdsale program and the mock AMM,
//! and configures logging.

use solana_program_test::{processor, ProgramTest};
use std::env;
use token_crowdsale::constants::amm_program;
use token_crowdsale::process_instruction;

use crate::common::mock_amm::process_mock_amm;
use crate::common::PROGRAM_ID;

/// Create a program test with the crowdsale program and the mock AMM
pub fn create_program_test() -> ProgramTest {
    let mut program_test = ProgramTest::new(
        "token_crowdsale",
        PROGRAM_ID,
        processor!(process_instruction),
    );
    program_test.add_program("mock_amm", amm_program::id(), processor!(process_mock_amm));
    program_test
}

/// Set minimal logging
pub fn init_logging() {
    env::set_var("RUST_LOG", "error,solana_runtime::message_processor::stable_log=error");
    let _ = env_logger::try_init();
}
