use bevy::prelude::*;

use crate::client::components::*;

pub fn update(
    mut query: Query<(&Animates, &mut ClipRequest)>,
    mut q_anim: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    for (&animates, mut request) in &mut query {
        let Some((clip, crossfade)) = request.0.take() else { continue };
        let Ok((mut player, mut transitions)) = q_anim.get_mut(animates.player) else { continue };

        let node = animates.node(clip);
        if transitions.get_main_animation() != Some(node) {
            trace!("crossfade to {clip:?} over {crossfade:?}");
            transitions.play(&mut player, node, crossfade).repeat();
        }
    }
}
