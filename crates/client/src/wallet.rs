//! Prepaid wallet service.

use eyre::Result;
use serde::{Deserialize, Serialize};

use mensa_primitives::{MinorUnits, Wallet};

use crate::connection::ConnectionInfo;

const WALLET_PATH: &str = "api/wallet/";
const TOPUP_PATH: &str = "api/wallet/topup/";

#[derive(Debug, Serialize)]
struct TopupBody {
    amount_minor: MinorUnits,
}

/// Top-up answers with an `{ ok, message, data }` envelope around the
/// updated wallet.
#[derive(Debug, Deserialize)]
struct TopupResponse {
    data: Wallet,
}

/// Balance reads and top-ups.
#[derive(Clone, Debug)]
pub struct WalletService {
    connection: ConnectionInfo,
}

impl WalletService {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    pub async fn wallet(&self) -> Result<Wallet> {
        self.connection.get(WALLET_PATH).await
    }

    /// Credit the wallet and return the updated balance.
    pub async fn topup(&self, amount_minor: MinorUnits) -> Result<Wallet> {
        let response: TopupResponse = self
            .connection
            .post(TOPUP_PATH, TopupBody { amount_minor })
            .await?;
        Ok(response.data)
    }
}
