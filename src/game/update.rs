// Game logic: the per-frame update
//
// One call to GameWorld::update advances the simulation by one frame:
//
// 1. Clock
// 2. Player controls (direct position edits, quit)
// 3. Timed enemy spawn
// 4. Outer pass over player, collectibles, explosion, death marker and
//    background. Each visit advances the entity, runs the enemy pass (AI,
//    pursuit trigger, contact damage), the pickup scan, timer expiry, and
//    finally draws the entity.
//
// Removals never happen while a collection is being walked: enemy hits and
// pickups are collected as indices and applied once the walk is over.

use crate::collision::{self, contact_radius, pursuit_radius};
use crate::config::EnemyPassMode;
use crate::enemy::steer;
use crate::entity::Entity;
use crate::input_system::MovementIntents;
use crate::player::apply_intents;
use crate::render::{PlayerAppearance, RenderAdapter};
use glam::{Mat4, Vec3};
use log::{debug, info, warn};

use super::{GameWorld, WorldEvent};

/// One stop of the outer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Player,
    Collectible(usize),
    Explosion,
    DeathMarker,
    Background,
}

impl GameWorld {
    /// Advances the world by `delta_time` seconds and draws it.
    ///
    /// A negative or non-finite `delta_time` is treated as zero, and so is one
    /// too large to survive the narrowing to `f32`.
    pub fn update<R: RenderAdapter + ?Sized>(
        &mut self,
        view: &Mat4,
        delta_time: f64,
        intents: &MovementIntents,
        renderer: &mut R,
    ) {
        let delta_time = sanitize_delta(delta_time);
        let dt = delta_time as f32;

        self.elapsed_time += delta_time;

        self.handle_controls(intents, dt);
        self.check_spawn();

        let per_entity = self.config.tuning.enemy_pass == EnemyPassMode::PerEntity;
        let mut slot = Some(self.first_slot());
        let mut first_visit = true;

        while let Some(current) = slot {
            self.visit(current, first_visit || per_entity, view, dt, renderer);
            first_visit = false;
            slot = self.next_slot(current);
        }
    }

    fn handle_controls(&mut self, intents: &MovementIntents, dt: f32) {
        // Quit is honoured even after death; movement is not
        if intents.quit && !self.should_terminate {
            info!("Quit requested");
            self.should_terminate = true;
            self.events.push(WorldEvent::QuitRequested);
        }

        if self.lives < 0 {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            apply_intents(player, intents, &self.controls, dt);
        }
    }

    /// At most one spawn per frame, however far the clock has run ahead.
    fn check_spawn(&mut self) {
        if self.elapsed_time > self.next_spawn_time {
            self.next_spawn_time += self.config.tuning.spawn_interval;
            let position = self.roll_spawn_position();
            self.spawn_enemy_at(position);
        }
    }

    /// Integer grid position `r - bias` per axis, one bias shared by both axes.
    fn roll_spawn_position(&mut self) -> Vec3 {
        let tuning = &self.config.tuning;
        let bias = self.rng.u32(0..=tuning.spawn_bias_max) as f32;
        let x = self.rng.u32(0..=tuning.spawn_offset_max) as f32 - bias;
        let y = self.rng.u32(0..=tuning.spawn_offset_max) as f32 - bias;
        Vec3::new(x, y, 0.0)
    }

    fn first_slot(&self) -> Slot {
        if self.player.is_some() {
            Slot::Player
        } else {
            self.slot_after_player()
        }
    }

    fn slot_after_player(&self) -> Slot {
        if self.collectibles.is_empty() {
            Slot::Explosion
        } else {
            Slot::Collectible(0)
        }
    }

    // Computed after each visit, so pickups made during the visit are
    // already reflected in the collectible count.
    fn next_slot(&self, slot: Slot) -> Option<Slot> {
        match slot {
            Slot::Player => Some(self.slot_after_player()),
            Slot::Collectible(index) if index + 1 < self.collectibles.len() => {
                Some(Slot::Collectible(index + 1))
            }
            Slot::Collectible(_) => Some(Slot::Explosion),
            Slot::Explosion => Some(Slot::DeathMarker),
            Slot::DeathMarker => Some(Slot::Background),
            Slot::Background => None,
        }
    }

    fn entity_at(&self, slot: Slot) -> Option<&Entity> {
        match slot {
            Slot::Player => self.player.as_ref(),
            Slot::Collectible(index) => self.collectibles.get(index),
            Slot::Explosion => Some(&self.explosion),
            Slot::DeathMarker => Some(&self.death_marker),
            Slot::Background => Some(&self.background),
        }
    }

    fn entity_at_mut(&mut self, slot: Slot) -> Option<&mut Entity> {
        match slot {
            Slot::Player => self.player.as_mut(),
            Slot::Collectible(index) => self.collectibles.get_mut(index),
            Slot::Explosion => Some(&mut self.explosion),
            Slot::DeathMarker => Some(&mut self.death_marker),
            Slot::Background => Some(&mut self.background),
        }
    }

    fn visit<R: RenderAdapter + ?Sized>(
        &mut self,
        slot: Slot,
        run_enemy_pass: bool,
        view: &Mat4,
        dt: f32,
        renderer: &mut R,
    ) {
        if let Some(entity) = self.entity_at_mut(slot) {
            entity.advance(dt);
        }

        if run_enemy_pass {
            self.enemy_pass(slot == Slot::Player, view, dt, renderer);
        }

        // The player may have died during the enemy pass
        let collects = self
            .entity_at(slot)
            .is_some_and(|entity| entity.kind().behavior().collects);
        if collects {
            self.pickup_scan(slot, renderer);
        }

        self.expire_timers(renderer);

        if let Some(entity) = self.entity_at(slot) {
            entity.render(renderer, view, self.elapsed_time);
        }
    }

    /// Steers, moves and draws every enemy, and resolves contact with the
    /// player. Only the player's own pass can start a pursuit.
    fn enemy_pass<R: RenderAdapter + ?Sized>(
        &mut self,
        player_pass: bool,
        view: &Mat4,
        dt: f32,
        renderer: &mut R,
    ) {
        let tuning = self.enemy_tuning;
        let pursuit_factor = self.config.tuning.pursuit_radius_factor;
        let margin = self.config.tuning.contact_margin;
        let mut destroyed = Vec::new();

        for index in 0..self.enemies.len() {
            let mut contact = None;

            let enemy = &mut self.enemies[index];
            if let Some(player) = &self.player {
                steer(enemy, player.position, &tuning, dt);
            }
            enemy.advance(dt);

            if let Some(player) = &self.player {
                let distance = collision::distance(&*enemy, player);

                if player_pass
                    && !enemy.tracking
                    && distance < pursuit_radius(player.scale(), pursuit_factor)
                {
                    enemy.tracking = true;
                    debug!("Enemy {} started pursuit", index);
                    self.events.push(WorldEvent::PursuitStarted);
                }

                if distance < contact_radius(player.scale(), margin) && !self.invulnerable {
                    contact = Some(enemy.position);
                }
            }

            match contact {
                Some(position) => {
                    destroyed.push(index);
                    self.resolve_contact(position);
                }
                None => self.enemies[index].render(renderer, view, self.elapsed_time),
            }
        }

        for index in destroyed.into_iter().rev() {
            self.enemies.remove(index);
        }
    }

    /// The enemy at `enemy_position` hit a vulnerable player.
    fn resolve_contact(&mut self, enemy_position: Vec3) {
        self.explosion.position = enemy_position;
        self.events.push(WorldEvent::EnemyDestroyed {
            position: enemy_position,
        });

        if self.lives <= 0 {
            self.kill_player();
        }

        self.lives -= 1;
        self.explosion_end_time = self.elapsed_time + self.config.tuning.explosion_duration;
        info!("Player hit, {} lives left", self.lives.max(0));
        self.events.push(WorldEvent::PlayerHit {
            lives_left: self.lives,
        });
    }

    /// Removes the player and freezes everything else in place.
    fn kill_player(&mut self) {
        let Some(player) = self.player.take() else {
            return;
        };

        self.death_marker.position = player.position;

        let everything = self
            .collectibles
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .chain([&mut self.explosion, &mut self.death_marker, &mut self.background]);
        for entity in everything {
            entity.velocity = Vec3::ZERO;
        }

        self.player_dead = true;
        info!("Player killed at ({:.2}, {:.2})", player.position.x, player.position.y);
        self.events.push(WorldEvent::PlayerKilled);
    }

    /// Removes collectibles touching the entity in `slot`.
    ///
    /// The player checks every collectible; a collectible only checks the
    /// ones after it.
    fn pickup_scan<R: RenderAdapter + ?Sized>(&mut self, slot: Slot, renderer: &mut R) {
        let (collector, first_candidate) = match slot {
            Slot::Player => match &self.player {
                Some(player) => (player, 0),
                None => return,
            },
            Slot::Collectible(index) => match self.collectibles.get(index) {
                Some(collectible) => (collectible, index + 1),
                None => return,
            },
            _ => return,
        };

        let threshold = contact_radius(collector.scale(), self.config.tuning.contact_margin);
        let picked: Vec<usize> = collision::check_collisions_with_collection(
            collector,
            &self.collectibles[first_candidate..],
            threshold,
        )
        .into_iter()
        .map(|offset| first_candidate + offset)
        .filter(|&index| {
            let other = &self.collectibles[index];
            !other.hostile && other.kind().behavior().collectable
        })
        .collect();

        for index in picked.into_iter().rev() {
            self.collectibles.remove(index);
            self.record_pickup(renderer);
        }
    }

    fn record_pickup<R: RenderAdapter + ?Sized>(&mut self, renderer: &mut R) {
        self.items_collected += 1;
        debug!("Item collected ({})", self.items_collected);
        self.events.push(WorldEvent::ItemCollected {
            count: self.items_collected,
        });

        if self.items_collected >= self.config.tuning.items_for_empowerment {
            self.items_collected = 0;
            self.invulnerable = true;
            self.invulnerability_end_time =
                self.elapsed_time + self.config.tuning.empowerment_duration;
            renderer.set_player_appearance(PlayerAppearance::Empowered);
            info!(
                "Player empowered until t={:.1}",
                self.invulnerability_end_time
            );
            self.events.push(WorldEvent::Empowered);
        }
    }

    /// A timer of 0 is inactive.
    fn expire_timers<R: RenderAdapter + ?Sized>(&mut self, renderer: &mut R) {
        if self.explosion_end_time > 0.0 && self.elapsed_time >= self.explosion_end_time {
            self.explosion.position = self.config.tuning.parking_position;
            self.explosion_end_time = 0.0;
            self.events.push(WorldEvent::ExplosionCleared);

            if self.lives < 0 {
                info!("Game Over");
                self.should_terminate = true;
                self.events.push(WorldEvent::GameOver);
            }
        }

        if self.invulnerability_end_time > 0.0
            && self.elapsed_time >= self.invulnerability_end_time
        {
            renderer.set_player_appearance(PlayerAppearance::Normal);
            self.invulnerable = false;
            self.invulnerability_end_time = 0.0;
            debug!("Empowerment expired");
            self.events.push(WorldEvent::EmpowermentExpired);
        }
    }
}

fn sanitize_delta(delta_time: f64) -> f64 {
    if delta_time >= 0.0 && (delta_time as f32).is_finite() {
        delta_time
    } else {
        warn!("Ignoring invalid frame delta {}", delta_time);
        0.0
    }
}
