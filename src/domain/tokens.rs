//! Static reference data: supported chains, exchanges and token addresses.

use std::fmt;

use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Chain {
    #[default]
    Arbitrum,
    Ethereum,
    Polygon,
    Optimism,
    Base,
}

impl Chain {
    /// The identifier the backend expects
    pub fn value(self) -> &'static str {
        match self {
            Chain::Arbitrum => "arbitrum",
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Optimism => "optimism",
            Chain::Base => "base",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Chain::Arbitrum => "Arbitrum",
            Chain::Ethereum => "Ethereum",
            Chain::Polygon => "Polygon",
            Chain::Optimism => "Optimism",
            Chain::Base => "Base",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Exchange {
    #[default]
    UniswapV3,
    UniswapV2,
    PancakeSwap,
    SushiSwap,
}

impl Exchange {
    pub fn value(self) -> &'static str {
        match self {
            Exchange::UniswapV3 => "uniswapv3",
            Exchange::UniswapV2 => "uniswapv2",
            Exchange::PancakeSwap => "pancakeswap",
            Exchange::SushiSwap => "sushiswap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Exchange::UniswapV3 => "Uniswap V3",
            Exchange::UniswapV2 => "Uniswap V2",
            Exchange::PancakeSwap => "PancakeSwap",
            Exchange::SushiSwap => "SushiSwap",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct Token {
    pub symbol: &'static str,
    pub name: &'static str,
    addresses: &'static [(Chain, &'static str)],
}

impl Token {
    pub fn address_on(&self, chain: Chain) -> Option<&'static str> {
        self.addresses
            .iter()
            .find(|(c, _)| *c == chain)
            .map(|(_, address)| *address)
    }
}

pub static TOKENS: &[Token] = &[
    Token {
        symbol: "WETH",
        name: "Wrapped Ethereum",
        addresses: &[
            (Chain::Ethereum, "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            (Chain::Arbitrum, "0x82aF49447D8a07e3BD95BD0d56f35241523fBab1"),
            (Chain::Optimism, "0x4200000000000000000000000000000000000006"),
            (Chain::Base, "0x4200000000000000000000000000000000000006"),
            (Chain::Polygon, "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"),
        ],
    },
    Token {
        symbol: "USDC",
        name: "USD Coin",
        addresses: &[
            (Chain::Ethereum, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            (Chain::Arbitrum, "0xAf88d065e77c8cC2239327C5EDb3A432268e5831"),
            (Chain::Optimism, "0x7F5c764cBc14f9669B88837ca1490cCa17c31607"),
            (Chain::Base, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            (Chain::Polygon, "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
        ],
    },
    Token {
        symbol: "USDT",
        name: "Tether USD",
        addresses: &[
            (Chain::Ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            (Chain::Arbitrum, "0xFd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"),
            (Chain::Optimism, "0x94b008aA00579c1307B0EF2c499aD98a8ce58e58"),
            (Chain::Base, "0xfde4C96c8593536E31F229EA8f37b2ADa2699bb2"),
            (Chain::Polygon, "0xc2132D05D31c914a87C6611C10748AEb04B58e8F"),
        ],
    },
    Token {
        symbol: "WBTC",
        name: "Wrapped Bitcoin",
        addresses: &[
            (Chain::Ethereum, "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
            (Chain::Arbitrum, "0x2f2a2543B76A4166549F7aaB2e75Bef0aefC5B0f"),
            (Chain::Optimism, "0x68f180fcCe6836688e9084f035309E29Bf0A2095"),
            (Chain::Base, "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb"),
            (Chain::Polygon, "0x1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"),
        ],
    },
    Token {
        symbol: "DAI",
        name: "Dai Stablecoin",
        addresses: &[
            (Chain::Ethereum, "0x6B175474E89094C44Da98b954EedeAC495271d0F"),
            (Chain::Arbitrum, "0xDA10009cBd5D07dd0CeCc66161FC93D7c9000da1"),
            (Chain::Optimism, "0xDA10009cBd5D07dd0CeCc66161FC93D7c9000da1"),
            (Chain::Base, "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb"),
            (Chain::Polygon, "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
        ],
    },
    Token {
        symbol: "ARB",
        name: "Arbitrum",
        addresses: &[(Chain::Arbitrum, "0x912CE59144191C1204E64559FE8253a0e49E6548")],
    },
    Token {
        symbol: "OP",
        name: "Optimism",
        addresses: &[(Chain::Optimism, "0x4200000000000000000000000000000000000042")],
    },
    Token {
        symbol: "MATIC",
        name: "Polygon",
        addresses: &[(Chain::Polygon, "0x0000000000000000000000000000000000001010")],
    },
];

/// Quick-select pairs offered above the pool form
pub const POPULAR_PAIRS: &[(&str, &str)] = &[
    ("WETH", "USDC"),
    ("WETH", "USDT"),
    ("WETH", "WBTC"),
    ("USDC", "USDT"),
    ("WETH", "DAI"),
];

pub fn find_token(symbol: &str) -> Option<&'static Token> {
    TOKENS.iter().find(|t| t.symbol == symbol)
}

/// Contract address of `symbol` on `chain`, if the token is deployed there
pub fn token_address(symbol: &str, chain: Chain) -> Option<&'static str> {
    find_token(symbol).and_then(|t| t.address_on(chain))
}

pub fn tokens_on(chain: Chain) -> impl Iterator<Item = &'static Token> {
    TOKENS.iter().filter(move |t| t.address_on(chain).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn chain_specific_tokens_only_listed_on_their_chain() {
        let on_arbitrum: Vec<&str> = tokens_on(Chain::Arbitrum).map(|t| t.symbol).collect();
        assert!(on_arbitrum.contains(&"ARB"));
        assert!(!on_arbitrum.contains(&"OP"));
        assert!(!on_arbitrum.contains(&"MATIC"));

        let on_ethereum: Vec<&str> = tokens_on(Chain::Ethereum).map(|t| t.symbol).collect();
        assert_eq!(on_ethereum, vec!["WETH", "USDC", "USDT", "WBTC", "DAI"]);
    }

    #[test]
    fn address_lookup() {
        assert_eq!(
            token_address("USDC", Chain::Arbitrum),
            Some("0xAf88d065e77c8cC2239327C5EDb3A432268e5831")
        );
        assert_eq!(token_address("OP", Chain::Base), None);
        assert_eq!(token_address("NOPE", Chain::Base), None);
    }

    #[test]
    fn popular_pairs_exist_on_default_chain() {
        for (a, b) in POPULAR_PAIRS {
            assert!(token_address(a, Chain::default()).is_some(), "{a}");
            assert!(token_address(b, Chain::default()).is_some(), "{b}");
        }
    }

    #[test]
    fn backend_identifiers_are_lowercase() {
        for chain in Chain::iter() {
            assert_eq!(chain.value(), chain.value().to_lowercase());
        }
        for exchange in Exchange::iter() {
            assert_eq!(exchange.value(), exchange.value().to_lowercase());
        }
    }
}
