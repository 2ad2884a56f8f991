//! Static instrument catalogs
//!
//! Read-only configuration data: sector → equity lists, the fund universe
//! (AMFI codes) and the ETF universe. Injected into the engine by
//! reference and never mutated.

use lazy_static::lazy_static;

use crate::models::{AssetClass, Candidate};

/// Eligible instruments per class, keyed by sector for equities.
#[derive(Clone)]
pub struct Universe {
    sectors: Vec<(String, Vec<Candidate>)>,
    funds: Vec<Candidate>,
    etfs: Vec<Candidate>,
}

impl Universe {
    pub fn new(
        sectors: Vec<(String, Vec<Candidate>)>,
        funds: Vec<Candidate>,
        etfs: Vec<Candidate>,
    ) -> Self {
        Self {
            sectors,
            funds,
            etfs,
        }
    }

    /// The built-in NSE catalog.
    pub fn builtin() -> &'static Universe {
        &BUILTIN
    }

    /// Equity candidates for the requested sectors, in request order.
    /// Unknown sectors contribute nothing; an empty request means all
    /// sectors in catalog order. A symbol listed under two requested
    /// sectors appears twice (one entry per list membership).
    pub fn equities_for(&self, requested: &[String]) -> Vec<Candidate> {
        if requested.is_empty() {
            return self
                .sectors
                .iter()
                .flat_map(|(_, list)| list.iter().cloned())
                .collect();
        }

        requested
            .iter()
            .filter_map(|name| {
                self.sectors
                    .iter()
                    .find(|(sector, _)| sector.eq_ignore_ascii_case(name))
            })
            .flat_map(|(_, list)| list.iter().cloned())
            .collect()
    }

    pub fn funds(&self) -> Vec<Candidate> {
        self.funds.clone()
    }

    pub fn etfs(&self) -> Vec<Candidate> {
        self.etfs.clone()
    }
}

fn sector(name: &str, entries: &[(&str, &str)]) -> (String, Vec<Candidate>) {
    (
        name.to_string(),
        entries
            .iter()
            .map(|(n, s)| Candidate::new(n, s, AssetClass::Stocks))
            .collect(),
    )
}

lazy_static! {
    static ref BUILTIN: Universe = Universe::new(
        vec![
            sector(
                "IT",
                &[
                    ("TCS", "TCS.NS"),
                    ("Infosys", "INFY.NS"),
                    ("Wipro", "WIPRO.NS"),
                    ("HCL Technologies", "HCLTECH.NS"),
                    ("Tech Mahindra", "TECHM.NS"),
                ],
            ),
            sector(
                "Banking",
                &[
                    ("HDFC Bank", "HDFCBANK.NS"),
                    ("ICICI Bank", "ICICIBANK.NS"),
                    ("Axis Bank", "AXISBANK.NS"),
                    ("Kotak Mahindra Bank", "KOTAKBANK.NS"),
                    ("State Bank of India", "SBIN.NS"),
                ],
            ),
            sector(
                "FMCG",
                &[
                    ("HUL", "HINDUNILVR.NS"),
                    ("ITC", "ITC.NS"),
                    ("Nestle India", "NESTLEIND.NS"),
                    ("Dabur", "DABUR.NS"),
                    ("Britannia", "BRITANNIA.NS"),
                ],
            ),
            sector(
                "Pharma",
                &[
                    ("Sun Pharma", "SUNPHARMA.NS"),
                    ("Dr Reddy's", "DRREDDY.NS"),
                    ("Cipla", "CIPLA.NS"),
                    ("Divis Labs", "DIVISLAB.NS"),
                    ("Aurobindo Pharma", "AUROPHARMA.NS"),
                ],
            ),
            sector(
                "Energy",
                &[
                    ("Reliance Industries", "RELIANCE.NS"),
                    ("ONGC", "ONGC.NS"),
                    ("NTPC", "NTPC.NS"),
                    ("Power Grid", "POWERGRID.NS"),
                    ("Adani Green Energy", "ADANIGREEN.NS"),
                ],
            ),
            sector(
                "Auto",
                &[
                    ("Maruti Suzuki", "MARUTI.NS"),
                    ("Tata Motors", "TATAMOTORS.NS"),
                    ("Mahindra & Mahindra", "M&M.NS"),
                    ("Bajaj Auto", "BAJAJ-AUTO.NS"),
                    ("Hero MotoCorp", "HEROMOTOCO.NS"),
                ],
            ),
            sector(
                "Health",
                &[
                    ("Apollo Hospitals", "APOLLOHOSP.NS"),
                    ("Fortis Healthcare", "FORTIS.NS"),
                    ("Max Healthcare", "MAXHEALTH.NS"),
                    ("Metropolis Healthcare", "METROPOLIS.NS"),
                    ("Dr Lal PathLabs", "LALPATHLAB.NS"),
                ],
            ),
        ],
        vec![
            Candidate::new("SBI Bluechip Fund", "119598", AssetClass::MutualFund),
            Candidate::new("ICICI Prudential Bluechip Fund", "120586", AssetClass::MutualFund),
            Candidate::new("HDFC Balanced Advantage Fund", "118968", AssetClass::MutualFund),
            Candidate::new("Axis Bluechip Fund", "120465", AssetClass::MutualFund),
            Candidate::new("Parag Parikh Flexi Cap Fund", "122639", AssetClass::MutualFund),
        ],
        vec![
            Candidate::new("Nippon India Nifty 50 BeES", "NIFTYBEES.NS", AssetClass::Etf),
            Candidate::new("Nippon India Junior BeES", "JUNIORBEES.NS", AssetClass::Etf),
            Candidate::new("Nippon India Bank BeES", "BANKBEES.NS", AssetClass::Etf),
            Candidate::new("Nippon India Gold BeES", "GOLDBEES.NS", AssetClass::Etf),
            Candidate::new("Motilal Oswal NASDAQ 100 ETF", "MON100.NS", AssetClass::Etf),
        ],
    );
}
