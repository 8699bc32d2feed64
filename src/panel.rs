//! Live parameter sliders.
//!
//! A slider binds a label to one float somewhere in the world (a translation
//! axis of an entity, or a property of a material asset). Writing the slider
//! writes straight through, so the next rendered frame shows the change.
use std::fmt::Write as _;

use bevy::prelude::*;

const FALLBACK_INCREMENT: f32 = 0.1;
const SHIFT_MULTIPLIER: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialProperty {
    Metalness,
    Roughness,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Translation { entity: Entity, axis: TranslationAxis },
    Material { handle: Handle<StandardMaterial>, property: MaterialProperty },
}

impl Binding {
    pub fn read(
        &self,
        translation_of: impl Fn(Entity) -> Option<Vec3>,
        materials: &Assets<StandardMaterial>,
    ) -> Option<f32> {
        match self {
            Binding::Translation { entity, axis } => {
                let t = translation_of(*entity)?;
                Some(match axis {
                    TranslationAxis::X => t.x,
                    TranslationAxis::Y => t.y,
                    TranslationAxis::Z => t.z,
                })
            }
            Binding::Material { handle, property } => {
                let material = materials.get(handle)?;
                Some(match property {
                    MaterialProperty::Metalness => material.metallic,
                    MaterialProperty::Roughness => material.perceptual_roughness,
                })
            }
        }
    }

    // false when the bound entity or asset is gone
    pub fn write(
        &self,
        value: f32,
        transforms: &mut Query<&mut Transform>,
        materials: &mut Assets<StandardMaterial>,
    ) -> bool {
        match self {
            Binding::Translation { entity, axis } => {
                let Ok(mut transform) = transforms.get_mut(*entity) else {
                    return false;
                };
                match axis {
                    TranslationAxis::X => transform.translation.x = value,
                    TranslationAxis::Y => transform.translation.y = value,
                    TranslationAxis::Z => transform.translation.z = value,
                }
                true
            }
            Binding::Material { handle, property } => {
                let Some(material) = materials.get_mut(handle) else {
                    return false;
                };
                match property {
                    MaterialProperty::Metalness => material.metallic = value,
                    MaterialProperty::Roughness => material.perceptual_roughness = value,
                }
                true
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Slider {
    pub label: String,
    pub binding: Binding,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl Slider {
    pub fn min(&mut self, min: f32) -> &mut Self {
        self.min = min;
        self
    }

    pub fn max(&mut self, max: f32) -> &mut Self {
        self.max = max;
        self
    }

    pub fn step(&mut self, step: f32) -> &mut Self {
        self.step = Some(step);
        self
    }

    /// Amount one key press moves the value: the step, else 1% of the range.
    pub fn increment(&self) -> f32 {
        match self.step {
            Some(step) if step > 0.0 => step,
            _ if (self.max - self.min).is_finite() => (self.max - self.min) / 100.0,
            _ => FALLBACK_INCREMENT,
        }
    }

    /// Snap to the step grid, then clamp into `[min, max]`.
    pub fn constrain(&self, value: f32) -> f32 {
        let snapped = match self.step {
            Some(step) if step > 0.0 => (value / step).round() * step,
            _ => value,
        };
        // max/min instead of clamp: never panics on an inverted range
        snapped.max(self.min).min(self.max)
    }

    pub fn nudge(&self, value: f32, steps: i32) -> f32 {
        self.constrain(value + self.increment() * steps as f32)
    }
}

#[derive(Resource, Debug)]
pub struct ControlPanel {
    sliders: Vec<Slider>,
    selected: usize,
    pub visible: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self { sliders: Vec::new(), selected: 0, visible: true }
    }
}

impl ControlPanel {
    /// Registers a slider with an unbounded range; chain `min`/`max`/`step`
    /// on the returned handle.
    pub fn add(&mut self, label: impl Into<String>, binding: Binding) -> &mut Slider {
        self.sliders.push(Slider {
            label: label.into(),
            binding,
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
            step: None,
        });
        let last = self.sliders.len() - 1;
        &mut self.sliders[last]
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Slider> {
        self.sliders.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.sliders.is_empty() {
            self.selected = (self.selected + 1) % self.sliders.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.sliders.is_empty() {
            self.selected = (self.selected + self.sliders.len() - 1) % self.sliders.len();
        }
    }

    pub fn render(
        &self,
        translation_of: impl Fn(Entity) -> Option<Vec3>,
        materials: &Assets<StandardMaterial>,
    ) -> String {
        let mut out = String::from("up/down select, left/right adjust, H hide\n");
        for (i, slider) in self.sliders.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            let _ = match slider.binding.read(&translation_of, materials) {
                Some(value) => writeln!(out, "{marker} {:<18}{value:>8.2}", slider.label),
                None => writeln!(out, "{marker} {:<18}{:>8}", slider.label, "--"),
            };
        }
        out
    }
}

#[derive(Component)]
pub struct PanelText;

pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlPanel>()
            .add_systems(Startup, spawn_panel_ui)
            .add_systems(Update, (panel_input, refresh_panel_text).chain());
    }
}

fn spawn_panel_ui(mut commands: Commands) {
    commands.spawn((
        Name::new("control_panel"),
        PanelText,
        Text::new(""),
        TextFont { font_size: 14.0, ..default() },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
    ));
}

pub fn panel_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<ControlPanel>,
    mut transforms: Query<&mut Transform>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if keys.just_pressed(KeyCode::KeyH) {
        panel.visible = !panel.visible;
    }
    if !panel.visible {
        return;
    }

    if keys.just_pressed(KeyCode::ArrowDown) {
        panel.select_next();
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        panel.select_previous();
    }

    let mut steps = 0;
    if keys.just_pressed(KeyCode::ArrowRight) {
        steps += 1;
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        steps -= 1;
    }
    if steps == 0 {
        return;
    }
    if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        steps *= SHIFT_MULTIPLIER;
    }

    let Some(slider) = panel.selected() else {
        return;
    };
    let current = slider
        .binding
        .read(|e| transforms.get(e).ok().map(|t| t.translation), &materials);
    let Some(current) = current else {
        warn!("slider {} is bound to something that no longer exists", slider.label);
        return;
    };

    let value = slider.nudge(current, steps);
    if slider.binding.write(value, &mut transforms, &mut materials) {
        debug!("{} = {:.2}", slider.label, value);
    }
}

fn refresh_panel_text(
    panel: Res<ControlPanel>,
    transforms: Query<&Transform>,
    materials: Res<Assets<StandardMaterial>>,
    mut texts: Query<(&mut Text, &mut Visibility), With<PanelText>>,
) {
    for (mut text, mut visibility) in &mut texts {
        let wanted = if panel.visible { Visibility::Inherited } else { Visibility::Hidden };
        visibility.set_if_neq(wanted);

        let body = panel.render(|e| transforms.get(e).ok().map(|t| t.translation), &materials);
        if text.0 != body {
            text.0 = body;
        }
    }
}
