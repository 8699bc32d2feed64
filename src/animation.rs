use bevy::prelude::*;

use crate::Rotates;

// Groups are set from wall-clock time since startup (never paused or clamped),
// so a group's pose depends on the time only and not on how many frames ran.
pub fn animate_groups(time: Res<Time<Real>>, mut groups: Query<(&Rotates, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (rotates, mut transform) in &mut groups {
        transform.rotation = rotates.rotation_at(elapsed);
    }
}

pub fn exit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("escape pressed, stopping");
        exit.write(AppExit::Success);
    }
}
