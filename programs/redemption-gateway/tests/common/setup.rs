//! Program deployment helpers for transaction tests.

use litesvm::LiteSVM;
use solana_pubkey::Pubkey;

/// Redemption gateway program ID (from centralized gateway-program-ids crate)
pub const GATEWAY_PROGRAM_ID: Pubkey = Pubkey::new_from_array(redemption_gateway::ID);

/// Mock pool program ID (test-only, any address works)
pub const MOCK_POOL_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("Poo1111111111111111111111111111111111111111");

/// Deploy the redemption gateway program
pub fn deploy_gateway_program(svm: &mut LiteSVM) -> Pubkey {
    let program_id = GATEWAY_PROGRAM_ID;
    let program_data = include_bytes!("../../../../target/deploy/redemption_gateway.so");
    let _ = svm.add_program(program_id, program_data);
    program_id
}

/// Deploy the mock pool program
pub fn deploy_mock_pool_program(svm: &mut LiteSVM) -> Pubkey {
    let program_id = MOCK_POOL_PROGRAM_ID;
    let program_data = include_bytes!("../../../../target/deploy/mock_pool.so");
    let _ = svm.add_program(program_id, program_data);
    program_id
}

/// Fresh VM with both programs deployed
pub fn new_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    deploy_gateway_program(&mut svm);
    deploy_mock_pool_program(&mut svm);
    svm
}
