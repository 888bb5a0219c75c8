// Deterministic, I/O-free reference data provider.
//
// Stands in for the government registry adapters: every lookup key is
// hashed and the taxation values are derived from that hash, so the
// same NCM (or state pair) always resolves to the same profile across
// processes and restarts. Real registry adapters implement the same
// `ReferenceDataProvider` trait upstream.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::core::Result;
use crate::modules::reference::models::{
    validate_ncm, validate_uf, IcmsProfile, NcmTaxProfile, OperationType, PisCofinsRegime,
};
use crate::modules::reference::services::provider::ReferenceDataProvider;

/// States whose outbound interstate movements carry the 12% rate when
/// the destination is also in this group (south/southeast)
const SOUTH_SOUTHEAST: [&str; 7] = ["SP", "RJ", "MG", "PR", "SC", "RS", "ES"];

/// Typical internal ICMS rates per UF, in percent tenths (e.g. 175 = 17.5%)
const INTERNAL_RATES: [(&str, i64); 27] = [
    ("AC", 170), ("AL", 180), ("AP", 180), ("AM", 180), ("BA", 180),
    ("CE", 180), ("DF", 180), ("ES", 170), ("GO", 170), ("MA", 180),
    ("MT", 170), ("MS", 170), ("MG", 180), ("PA", 170), ("PB", 180),
    ("PR", 180), ("PE", 180), ("PI", 180), ("RJ", 200), ("RN", 180),
    ("RS", 180), ("RO", 175), ("RR", 170), ("SC", 170), ("SP", 180),
    ("SE", 180), ("TO", 180),
];

/// Deterministic value stream seeded from a lookup key.
///
/// splitmix64 over a sha256-derived seed; quality is irrelevant here,
/// only stability of the mapping from key to values.
struct SeedStream {
    state: u64,
}

impl SeedStream {
    fn from_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self {
            state: u64::from_be_bytes(bytes),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform pick from a slice
    fn choice<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[(self.next_u64() % options.len() as u64) as usize]
    }

    /// True with probability `pct_chance` out of 100
    fn chance(&mut self, pct_chance: u64) -> bool {
        self.next_u64() % 100 < pct_chance
    }

    /// Uniform percentage with 2 decimal places in `[lo, hi]`, both in
    /// hundredths (e.g. 65..=210 yields 0.65%..2.10%)
    fn rate_between(&mut self, lo: u64, hi: u64) -> Decimal {
        let span = hi - lo + 1;
        Decimal::new((lo + self.next_u64() % span) as i64, 2)
    }
}

/// Provider backed by deterministic seeded generation
#[derive(Debug, Clone, Default)]
pub struct SeededReferenceProvider;

impl SeededReferenceProvider {
    pub fn new() -> Self {
        Self
    }

    fn internal_rate(uf: &str) -> Decimal {
        let tenths = INTERNAL_RATES
            .iter()
            .find(|(code, _)| *code == uf)
            .map(|(_, rate)| *rate)
            .unwrap_or(180);
        Decimal::new(tenths, 1)
    }

    fn interstate_rate(origin: &str, dest: &str) -> Decimal {
        let origin_south = SOUTH_SOUTHEAST.contains(&origin);
        let dest_south = SOUTH_SOUTHEAST.contains(&dest);
        // 12% when both sides are in the same band (inside or outside
        // the south/southeast group), 7% when the movement crosses it
        let rate = if origin_south == dest_south { 12 } else { 7 };
        Decimal::from(rate)
    }
}

#[async_trait]
impl ReferenceDataProvider for SeededReferenceProvider {
    async fn ncm_profile(&self, ncm: &str) -> Result<NcmTaxProfile> {
        validate_ncm(ncm)?;

        let mut stream = SeedStream::from_key(&format!("ncm:{}", ncm));

        let regime = *stream.choice(&[
            PisCofinsRegime::Standard,
            PisCofinsRegime::Monophasic,
            PisCofinsRegime::ZeroRate,
        ]);
        let pis = stream.rate_between(65, 210);
        let cofins = stream.rate_between(300, 860);
        let ipi = Decimal::from(*stream.choice(&[0u32, 5, 10, 15, 20, 25]));

        Ok(NcmTaxProfile {
            ncm: ncm.to_string(),
            description: format!("Produto classificado no NCM {}", ncm),
            regime,
            pis_standard_rate: Some(pis),
            cofins_standard_rate: Some(cofins),
            ipi_standard_rate: Some(ipi),
        })
    }

    async fn icms_profile(
        &self,
        origin_state: &str,
        dest_state: &str,
        ncm: &str,
        operation_type: OperationType,
    ) -> Result<IcmsProfile> {
        validate_uf(origin_state)?;
        validate_uf(dest_state)?;
        validate_ncm(ncm)?;

        let mut stream =
            SeedStream::from_key(&format!("icms:{}:{}:{}", origin_state, dest_state, ncm));

        let internal_origin = Self::internal_rate(origin_state);
        let internal_dest = Self::internal_rate(dest_state);
        let interstate = Self::interstate_rate(origin_state, dest_state);

        let substitution_applicable = stream.chance(40);
        let substitution_margin = if substitution_applicable {
            Some(stream.rate_between(2000, 5000))
        } else {
            None
        };

        let fcp_rate = if stream.chance(30) {
            Decimal::from(*stream.choice(&[0u32, 1, 2]))
        } else {
            Decimal::ZERO
        };

        // DIFAL applies to interstate movements only; since 2023 the
        // destination state keeps the full differential
        let interstate_movement = origin_state != dest_state;
        let (surtax, origin_share, dest_share) = if interstate_movement {
            (internal_dest, Decimal::ZERO, Decimal::ONE_HUNDRED)
        } else {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        };

        Ok(IcmsProfile {
            origin_state: origin_state.to_string(),
            dest_state: dest_state.to_string(),
            operation_type,
            internal_rate_origin: Some(internal_origin),
            internal_rate_dest: Some(internal_dest),
            interstate_rate: Some(interstate),
            substitution_applicable,
            substitution_margin,
            destination_surtax_rate: surtax,
            origin_share,
            dest_share,
            fcp_rate,
        })
    }
}
