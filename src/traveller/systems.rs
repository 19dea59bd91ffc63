use bevy::prelude::*;

use crate::path::PathData;

use super::{PathTraveller, PlayRequest, TravellerEvent, TravellerSettings};

/// System that queues a play request for newly added auto-start travellers.
pub fn auto_start_path_travellers(mut travellers: Query<&mut PathTraveller, Added<PathTraveller>>) {
    for mut traveller in &mut travellers {
        if traveller.auto_start && traveller.path.is_some() {
            traveller.request_play();
        }
    }
}

/// System that resolves pending play requests.
///
/// The anchor is cached from the entity's current translation before playing.
pub fn start_path_travellers(
    mut travellers: Query<(Entity, &mut PathTraveller, &Transform)>,
    paths: Query<&PathData>,
) {
    for (entity, mut traveller, transform) in &mut travellers {
        let Some(request) = traveller.take_play_request() else {
            continue;
        };

        let path_entity = match request {
            PlayRequest::Path(path) => Some(path),
            PlayRequest::Current if traveller.has_path() => None,
            PlayRequest::Current => traveller.path,
        };

        let path = match path_entity {
            Some(path_entity) => match paths.get(path_entity) {
                Ok(path) => Some(path),
                Err(_) => {
                    error!("traveller {entity}: entity {path_entity} holds no path data");
                    continue;
                }
            },
            None => None,
        };

        traveller.cache_start_position(transform.translation);
        if let Err(err) = traveller.play(path) {
            error!("traveller {entity}: {err}");
        }
    }
}

/// System that advances every moving traveller and applies its pose.
pub fn update_path_travellers(
    settings: Res<TravellerSettings>,
    time: Res<Time>,
    mut travellers: Query<(Entity, &mut PathTraveller, &mut Transform)>,
    mut events: MessageWriter<TravellerEvent>,
) {
    if !settings.enabled {
        return;
    }

    let delta = time.delta_secs() * settings.time_scale;

    for (entity, mut traveller, mut transform) in &mut travellers {
        if !traveller.is_moving() {
            continue;
        }

        let reached = traveller.advance(delta);

        transform.translation = traveller.position();
        transform.rotation = traveller.rotation();

        if let Some(endpoint) = reached {
            events.write(TravellerEvent {
                entity,
                endpoint,
                behavior: traveller.endpoint_behavior,
            });
        }
    }
}
