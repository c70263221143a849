use smartpa::hal::mock::SimulatedCard;
use smartpa::hal::{AudioMode, SndDevice};
use smartpa::registry::{
    close_device, linked_modules, ModuleRegistry, AMPLIFIER_DEVICE_API_VERSION,
    AMPLIFIER_HARDWARE_INTERFACE, AMPLIFIER_HARDWARE_MODULE_ID,
};
use smartpa::AmpError;

#[test]
fn test_registry_with_default_modules() {
    let registry = ModuleRegistry::with_defaults();

    let modules = registry.list_modules();
    assert_eq!(modules, vec![AMPLIFIER_HARDWARE_MODULE_ID.to_string()]);

    let module = registry.get(AMPLIFIER_HARDWARE_MODULE_ID).unwrap();
    assert_eq!(module.name, "TAS2562 audio amplifier HAL");
    assert_eq!(module.api_version, AMPLIFIER_DEVICE_API_VERSION);
}

#[test]
fn test_linked_modules_include_tas2562() {
    assert!(linked_modules().any(|m| m.name == "TAS2562 audio amplifier HAL"));

    let registry = ModuleRegistry::discover();
    assert!(registry.get(AMPLIFIER_HARDWARE_MODULE_ID).is_some());
}

#[test]
fn test_open_wrong_interface_is_not_found() {
    let registry = ModuleRegistry::with_defaults();

    let err = registry
        .open(AMPLIFIER_HARDWARE_MODULE_ID, "audio_hw_if")
        .err()
        .unwrap();
    assert!(matches!(err, AmpError::NotFound(_)));
    assert_eq!(err.status(), -19);
}

#[test]
fn test_device_driven_through_trait_object() {
    let registry = ModuleRegistry::with_defaults();
    let card = SimulatedCard::new();
    let mut adev = card.audio_device();

    let mut device = registry
        .open(AMPLIFIER_HARDWARE_MODULE_ID, AMPLIFIER_HARDWARE_INTERFACE)
        .unwrap();

    device.set_mode(AudioMode::Ringtone).unwrap();
    device.set_feedback(Some(&mut adev), SndDevice::OutSpeakerAndHeadphones, true).unwrap();
    assert_eq!(card.journal().live_streams(), 1);

    device.set_feedback(Some(&mut adev), SndDevice::OutSpeakerAndHeadphones, false).unwrap();
    assert_eq!(card.journal().live_streams(), 0);

    close_device(Some(device)).unwrap();
    close_device(None).unwrap();
}

#[test]
fn test_closing_with_active_feedback_releases_stream() {
    let registry = ModuleRegistry::with_defaults();
    let card = SimulatedCard::new();
    let mut adev = card.audio_device();

    let mut device = registry
        .open(AMPLIFIER_HARDWARE_MODULE_ID, AMPLIFIER_HARDWARE_INTERFACE)
        .unwrap();
    device.set_feedback(Some(&mut adev), SndDevice::OutSpeaker, true).unwrap();

    close_device(Some(device)).unwrap();
    assert_eq!(card.journal().live_streams(), 0);
}
