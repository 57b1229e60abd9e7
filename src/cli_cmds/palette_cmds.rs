use anyhow::{bail, Result};
use swatchy::color::{hex_to_hsv, hsv_to_hex};
use swatchy::config::Config;
use swatchy::naming::{color_temperature, theme_name};
use swatchy::synth::first_feasible;
use swatchy::{HarmonyType, SwatchError, Theme};

use super::{load_corpus, rng};

pub fn cmd_palette(
    config: &Config,
    seed: &str,
    size: usize,
    harmony: Option<HarmonyType>,
    json: bool,
) -> Result<()> {
    if size < 2 {
        return Err(SwatchError::InvalidPaletteSize(size).into());
    }

    let corpus = load_corpus(config)?;
    let seed = corpus.find(seed)?;
    let mut rng = rng(config);

    let built = match harmony {
        Some(harmony) => harmony
            .generate(seed, size, corpus.colors(), &mut rng)
            .map(|palette| (harmony, palette)),
        None => first_feasible(seed, size, corpus.colors(), &mut rng),
    };
    let Some((harmony, palette)) = built else {
        match harmony {
            Some(h) => bail!(
                "No {} palette of {} colors fits around {}",
                h.display_name(),
                size,
                seed.name
            ),
            None => bail!("No harmony can fill {} colors around {}", size, seed.name),
        }
    };

    let name = theme_name(seed, harmony.as_str(), &palette, &mut rng);
    let theme = Theme::new(seed, harmony, &palette, name);

    if json {
        println!("{}", serde_json::to_string_pretty(&theme)?);
        return Ok(());
    }

    println!(
        "{} ({}, {} colors)",
        theme.theme_name,
        harmony.display_name(),
        theme.palette_size
    );
    for color in &palette {
        println!(
            "  {:<10} {}  {:>5.1}°  {}",
            color.code,
            color.hex,
            color.hue(),
            color.name
        );
    }

    Ok(())
}

pub fn cmd_inspect(hex: &str) -> Result<()> {
    let hex = hex.trim();
    let hex = if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{hex}")
    };
    let (hue, saturation, value) = hex_to_hsv(&hex)?;

    println!("hex:         {}", hex.to_lowercase());
    println!("hue:         {:.1}", hue);
    println!("saturation:  {:.3}", saturation);
    println!("value:       {:.3}", value);
    println!("temperature: {}", color_temperature(hue, saturation).as_str());
    println!("round trip:  {}", hsv_to_hex(hue, saturation, value));

    Ok(())
}
