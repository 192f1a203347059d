pub mod deposit_service;
pub mod deposited_service;
pub mod mint_service;
pub mod minter_service;
pub mod price_service;

pub use deposit_service::*;
pub use deposited_service::*;
pub use mint_service::*;
pub use minter_service::*;
pub use price_service::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::NetworkInfo;

    pub const HOME_CHAIN: u64 = 31337;
    pub const SIDE_CHAIN: u64 = 80001;

    pub fn network() -> NetworkInfo {
        NetworkInfo::from_json(
            r#"{
                "31337": {
                    "DEPOSITOR_ADDRESS": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                    "MINTER_ADDRESS": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
                    "TOKEN": {
                        "USDC": {
                            "address": "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
                            "decimals": 6,
                            "priceFeed": "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"
                        },
                        "WETH": {
                            "address": "0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9",
                            "decimals": 18
                        }
                    }
                },
                "80001": {
                    "DEPOSITOR_ADDRESS": "0x0165878A594ca255338adfa4d48449f69242Eb8F",
                    "TOKEN": {
                        "USDC": {
                            "address": "0xa513E6E4b8f2a923D98304ec87F64353C4D5C853",
                            "decimals": 6
                        }
                    }
                }
            }"#,
        )
        .expect("test network map is valid")
    }
}
