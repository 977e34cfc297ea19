//! Yearn V3 vaults (ERC-4626 tokenized strategies).

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{Address, U256},
    contracts::YearnVault,
    number::units::{exp10, format_units},
};

pub const NAME: &str = "Yearn V3";

/// Loss accepted when redeeming, in basis points.
const MAX_LOSS_BPS: u64 = 1;

pub fn deposit_preview(token_name: &str, vault: Address) -> PreviewTx {
    PreviewTx::new("Deposit", format!("{token_name} to vault on {NAME}"), vault).highlight(NAME)
}

/// Deposits `amount` of the vault asset for `receiver`. Amounts are shown
/// in the vault's own decimals.
pub async fn deposit(
    node: &dyn Node,
    token_name: &str,
    vault: Address,
    amount: U256,
    receiver: Address,
) -> Result<Tx, Error> {
    let decimals = erc20::decimals(node, vault).await?;
    Ok(Tx::call(
        "Deposit",
        format!(
            "{} {token_name} to vault on {NAME}",
            format_units(amount, decimals)
        ),
        vault,
        &YearnVault::depositCall {
            assets: amount,
            receiver,
        },
    )
    .highlight(NAME))
}

/// A vault of the curated catalog together with the asset it takes.
#[derive(Debug, Clone, Copy)]
pub struct Vault {
    pub name: &'static str,
    /// Symbol of the vault share token.
    pub shares: &'static str,
    pub address: Address,
    pub asset: Token,
}

impl Vault {
    /// The share token. Shares use the decimals of the asset.
    pub fn shares(&self) -> Token {
        Token::new(self.address, self.shares, self.asset.decimals)
    }

    pub fn approve_preview(&self) -> PreviewTx {
        PreviewTx::new(
            "Approve",
            format!("{} to {NAME}", self.asset.symbol),
            self.asset.address,
        )
        .highlight(NAME)
    }

    pub fn approve(&self, amount: U256) -> Tx {
        Tx::call(
            "Approve",
            format!(
                "{} vault to spend {} on {NAME}",
                self.name,
                self.asset.format(amount)
            ),
            self.asset.address,
            &contracts::IERC20::approveCall {
                spender: self.address,
                amount,
            },
        )
        .highlight(NAME)
    }

    pub fn deposit_preview(&self) -> PreviewTx {
        PreviewTx::new(
            "Deposit",
            format!("{} to {NAME}", self.asset.symbol),
            self.address,
        )
        .highlight(NAME)
    }

    pub fn deposit(&self, amount: U256, receiver: Address) -> Tx {
        Tx::call(
            "Deposit",
            format!(
                "{} to vault {} on {NAME}",
                self.asset.format(amount),
                self.name
            ),
            self.address,
            &YearnVault::depositCall {
                assets: amount,
                receiver,
            },
        )
        .highlight(NAME)
    }

    /// Assets a single whole share is worth.
    pub async fn price_per_share(&self, node: &dyn Node) -> Result<U256, Error> {
        Ok(node
            .read(self.address, YearnVault::pricePerShareCall {})
            .await?)
    }

    /// Assets `shares` redeem for at `price_per_share`.
    pub fn assets_for(&self, shares: U256, price_per_share: U256) -> Result<U256, Error> {
        let assets = shares
            .checked_mul(price_per_share)
            .ok_or(Error::Overflow)?;
        Ok(assets / exp10(self.asset.decimals))
    }

    pub fn withdraw_preview(&self) -> PreviewTx {
        PreviewTx::new(
            "Withdraw",
            format!("{} to {} from Yearn", self.shares, self.asset.symbol),
            self.address,
        )
        .highlight(NAME)
    }

    /// Redeems `shares` of `owner` back to them. `assets` is only used for
    /// the description.
    pub fn withdraw(&self, shares: U256, assets: U256, owner: Address) -> Tx {
        Tx::call(
            "Withdraw",
            format!(
                "{} to {} from Yearn",
                self.shares().format(shares),
                self.asset.format(assets)
            ),
            self.address,
            &YearnVault::redeemCall {
                shares,
                receiver: owner,
                owner,
                max_loss: U256::from(MAX_LOSS_BPS),
            },
        )
        .highlight(NAME)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::sol_types::SolCall, contracts::addresses::polygon};

    #[test]
    fn describes_vault_steps() {
        let vault = Vault {
            name: "DAI-A",
            shares: "yvDAI-A",
            address: polygon::YEARN_V3_DAI_A,
            asset: Token::new(polygon::DAI, "DAI", 18),
        };
        let amount = U256::from(10).pow(U256::from(18));
        assert_eq!(
            vault.approve(amount).description,
            "DAI-A vault to spend 1 DAI on Yearn V3"
        );
        let deposit = vault.deposit(amount, Address::repeat_byte(1));
        assert_eq!(deposit.description, "1 DAI to vault DAI-A on Yearn V3");
        assert_eq!(deposit.to, polygon::YEARN_V3_DAI_A);
        assert_eq!(deposit.meta.highlights, [NAME]);
    }

    #[test]
    fn redeems_shares_with_bounded_loss() {
        let vault = Vault {
            name: "USDT-A",
            shares: "yvUSDT-A",
            address: polygon::YEARN_V3_USDT,
            asset: Token::new(polygon::USDT, "USDT", 6),
        };
        let owner = Address::repeat_byte(1);
        let assets = vault
            .assets_for(U256::from(2_000_000), U256::from(1_050_000))
            .unwrap();
        assert_eq!(assets, U256::from(2_100_000));

        let tx = vault.withdraw(U256::from(2_000_000), assets, owner);
        assert_eq!(tx.description, "2 yvUSDT-A to 2.1 USDT from Yearn");
        let call = YearnVault::redeemCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.receiver, owner);
        assert_eq!(call.owner, owner);
        assert_eq!(call.max_loss, U256::from(1));
    }
}
