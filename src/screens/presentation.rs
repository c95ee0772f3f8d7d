//! Presentation: a start button and a fullscreen slide carousel.

use super::Ctx;
use crate::{
    config::SlideCfg,
    events::{Action, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
};

pub struct PresentationScreen {
    slides: Vec<SlideCfg>,
    start: FocusNavigator,
    /// Fullscreen carousel while the show runs.
    show: Option<FocusNavigator>,
}

impl PresentationScreen {
    pub fn mount(ctx: &Ctx) -> Result<Self, NavError> {
        let start = FocusNavigator::listening(
            NavConfig::linear(1).throttle(ctx.cfg.throttle()),
            ctx.bus,
        )?;
        Ok(Self {
            slides: ctx.cfg.presentation.slides.clone(),
            start,
            show: None,
        })
    }

    pub fn slides(&self) -> &[SlideCfg] {
        &self.slides
    }

    pub fn is_fullscreen(&self) -> bool {
        self.show.is_some()
    }

    /// Index of the slide on screen while fullscreen.
    pub fn current_slide(&self) -> Option<usize> {
        self.show.as_ref().and_then(FocusNavigator::position)
    }

    pub fn pump(&mut self, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        if let Some(show) = self.show.as_mut() {
            if show.pump().contains(&NavOutcome::Back) {
                show.destroy();
                self.show = None;
                self.start.subscribe(ctx.bus);
                tracing::debug!("presentation left fullscreen");
            }
            return Ok(vec![]);
        }
        for outcome in self.start.pump() {
            match outcome {
                NavOutcome::Selected(_) if self.slides.is_empty() => {
                    return Ok(vec![Action::Notice("No slides configured".into())]);
                }
                NavOutcome::Selected(_) => {
                    let show = FocusNavigator::listening(
                        NavConfig::carousel(self.slides.len())
                            .throttle(ctx.cfg.throttle())
                            .without_select(),
                        ctx.bus,
                    )?;
                    self.start.unsubscribe();
                    self.show = Some(show);
                    tracing::debug!(slides = self.slides.len(), "presentation fullscreen");
                    break;
                }
                NavOutcome::Back => return Ok(vec![Action::Open(Route::Home)]),
                _ => {}
            }
        }
        Ok(vec![])
    }

    pub fn unmount(&mut self) {
        if let Some(show) = self.show.as_mut() {
            show.destroy();
        }
        self.start.destroy();
    }
}
