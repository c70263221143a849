use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;

use smartpa::error::status_of;
use smartpa::hal::mock::SimulatedCard;
use smartpa::hal::{AudioMode, SndDevice};
use smartpa::registry::{
    close_device, ModuleRegistry, AMPLIFIER_HARDWARE_INTERFACE, AMPLIFIER_HARDWARE_MODULE_ID,
};
use smartpa::variant::{resolve, MemoryPropertyStore, VariantStorage};

fn main() -> Result<()> {
    // Forwards the library's `log` records as well
    tracing_subscriber::fmt().with_max_level(LevelFilter::INFO).init();

    println!("TAS2562 smart-PA HAL demo");
    println!("=========================\n");

    let registry = ModuleRegistry::discover();
    println!("Linked amplifier modules: {:?}\n", registry.list_modules());

    let card = SimulatedCard::new();
    let mut adev = card.audio_device();
    let mut amp = registry.open(AMPLIFIER_HARDWARE_MODULE_ID, AMPLIFIER_HARDWARE_INTERFACE)?;

    println!("--- Ringtone on speaker ---");
    amp.set_mode(AudioMode::Ringtone)?;
    amp.set_feedback(Some(&mut adev), SndDevice::OutSpeaker, true)?;
    amp.set_feedback(Some(&mut adev), SndDevice::OutSpeaker, false)?;

    println!("\n--- Headphones (no feedback) ---");
    amp.set_feedback(Some(&mut adev), SndDevice::OutHeadphones, true)?;

    println!("\n--- Capture stream fails to start ---");
    card.inject(|f| f.pcm_start = true);
    let result = amp.set_feedback(Some(&mut adev), SndDevice::OutSpeaker, true);
    println!("set_feedback status: {}", status_of(&result));
    println!("usecases left active: {}", adev.usecases.len());

    close_device(Some(amp))?;
    println!("\n{} HAL calls recorded", card.journal().len());

    let mut args = env::args().skip(1);
    let (Some(table_path), Some(props_path)) = (args.next(), args.next()) else {
        println!("\nPass <variants.json> <boot.prop> to run variant resolution");
        return Ok(());
    };

    println!("\n--- Variant resolution ---");
    let config = VariantStorage::new(PathBuf::from(table_path)).load()?;
    let mut props = MemoryPropertyStore::load(&PathBuf::from(props_path))?;

    match resolve(&mut props, &config.variants)? {
        Some(variant) => println!("Applied {} {} ({})", variant.brand, variant.model, variant.device),
        None => println!("No matching variant in {} entries", config.variants.len()),
    }
    for (key, value) in props.writes() {
        println!("  {} = {}", key, value);
    }

    Ok(())
}
