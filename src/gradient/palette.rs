use rand::Rng;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{LowPolyError, LowPolyResult};

/// Named 6-class ColorBrewer schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Palette {
    YlGn,
    YlGnBu,
    GnBu,
    BuPu,
    RdPu,
    OrRd,
    PuBuGn,
    Spectral,
    RdYlBu,
    PiYG,
}

impl Palette {
    pub const ALL: [Palette; 10] = [
        Palette::YlGn,
        Palette::YlGnBu,
        Palette::GnBu,
        Palette::BuPu,
        Palette::RdPu,
        Palette::OrRd,
        Palette::PuBuGn,
        Palette::Spectral,
        Palette::RdYlBu,
        Palette::PiYG,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::YlGn => "YlGn",
            Self::YlGnBu => "YlGnBu",
            Self::GnBu => "GnBu",
            Self::BuPu => "BuPu",
            Self::RdPu => "RdPu",
            Self::OrRd => "OrRd",
            Self::PuBuGn => "PuBuGn",
            Self::Spectral => "Spectral",
            Self::RdYlBu => "RdYlBu",
            Self::PiYG => "PiYG",
        }
    }

    /// Case-insensitive lookup by scheme name.
    pub fn parse(name: &str) -> LowPolyResult<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LowPolyError::validation(format!("unknown palette '{wanted}'")))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    fn hex_codes(self) -> [&'static str; 6] {
        match self {
            Self::YlGn => ["#ffffcc", "#d9f0a3", "#addd8e", "#78c679", "#31a354", "#006837"],
            Self::YlGnBu => ["#ffffcc", "#c7e9b4", "#7fcdbb", "#41b6c4", "#2c7fb8", "#253494"],
            Self::GnBu => ["#f0f9e8", "#ccebc5", "#a8ddb5", "#7bccc4", "#43a2ca", "#0868ac"],
            Self::BuPu => ["#edf8fb", "#bfd3e6", "#9ebcda", "#8c96c6", "#8856a7", "#810f7c"],
            Self::RdPu => ["#feebe2", "#fcc5c0", "#fa9fb5", "#f768a1", "#c51b8a", "#7a0177"],
            Self::OrRd => ["#fef0d9", "#fdd49e", "#fdbb84", "#fc8d59", "#e34a33", "#b30000"],
            Self::PuBuGn => ["#f6eff7", "#d0d1e6", "#a6bddb", "#67a9cf", "#1c9099", "#016c59"],
            Self::Spectral => ["#d53e4f", "#fc8d59", "#fee08b", "#e6f598", "#99d594", "#3288bd"],
            Self::RdYlBu => ["#d73027", "#fc8d59", "#fee090", "#e0f3f8", "#91bfdb", "#4575b4"],
            Self::PiYG => ["#c51b7d", "#e9a3c9", "#fde0ef", "#e6f5d0", "#a1d76a", "#4d9221"],
        }
    }

    /// The scheme's six native colors.
    pub fn base_colors(self) -> LowPolyResult<Vec<Rgba8>> {
        self.hex_codes().iter().map(|h| Rgba8::from_hex(h)).collect()
    }

    /// `count` colors evenly resampled across the scheme, endpoints included.
    pub fn colors(self, count: usize) -> LowPolyResult<Vec<Rgba8>> {
        if count == 0 {
            return Err(LowPolyError::validation("palette color count must be > 0"));
        }
        let base = self.base_colors()?;
        if count == base.len() {
            return Ok(base);
        }
        if count == 1 {
            return Ok(vec![base[0]]);
        }

        let last = (base.len() - 1) as f64;
        Ok((0..count)
            .map(|i| {
                let pos = i as f64 * last / (count - 1) as f64;
                let lo = pos.floor() as usize;
                let hi = (lo + 1).min(base.len() - 1);
                Rgba8::lerp(base[lo], base[hi], pos - lo as f64)
            })
            .collect())
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Palette {
    type Err = LowPolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_palette_parses_its_codes() {
        for p in Palette::ALL {
            let colors = p.base_colors().unwrap();
            assert_eq!(colors.len(), 6);
            assert!(colors.iter().all(|c| c.a == 255));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Palette::parse("spectral").unwrap(), Palette::Spectral);
        assert_eq!("  rdylbu ".parse::<Palette>().unwrap(), Palette::RdYlBu);
        assert!(Palette::parse("Viridis").is_err());
    }

    #[test]
    fn resampling_keeps_endpoints() {
        let base = Palette::OrRd.base_colors().unwrap();
        let eleven = Palette::OrRd.colors(11).unwrap();
        assert_eq!(eleven.len(), 11);
        assert_eq!(eleven[0], base[0]);
        assert_eq!(eleven[10], base[5]);
        // 11 samples over 5 spans land exactly on every second sample.
        assert_eq!(eleven[2], base[1]);
        assert!(Palette::OrRd.colors(0).is_err());
        assert_eq!(Palette::OrRd.colors(1).unwrap(), vec![base[0]]);
    }
}
