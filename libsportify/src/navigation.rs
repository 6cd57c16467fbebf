//! Navigation shell
//!
//! Tracks which screen a front end should show. The auth flag decides
//! between the login route and the tabbed main routes; the detail route sits
//! on top of whichever tab opened it.

use crate::store::AppState;

/// Tabs of the authenticated main view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Favourites,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Main(Tab),
    /// Detail view of `teams.selected_team`
    Details,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    route: Route,
    /// Tab to return to from `Details`
    tab: Tab,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            route: Route::Login,
            tab: Tab::Home,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Follow the auth flag
    ///
    /// Unauthenticated always lands on `Login`. The first authenticated sync
    /// after `Login` lands on the home tab. A detail view whose team was
    /// cleared falls back to its tab.
    pub fn sync(&mut self, state: &AppState) -> Route {
        if !state.is_authenticated() {
            self.route = Route::Login;
            self.tab = Tab::Home;
            return self.route;
        }

        match self.route {
            Route::Login => {
                self.tab = Tab::Home;
                self.route = Route::Main(Tab::Home);
            }
            Route::Details if state.teams.selected_team.is_none() => {
                self.route = Route::Main(self.tab);
            }
            _ => {}
        }
        self.route
    }

    /// Switch tabs; ignored on the login route
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.route == Route::Login {
            return false;
        }
        self.tab = tab;
        self.route = Route::Main(tab);
        true
    }

    /// Open the detail view; needs a session and a selected team
    pub fn open_details(&mut self, state: &AppState) -> bool {
        if self.route == Route::Login
            || !state.is_authenticated()
            || state.teams.selected_team.is_none()
        {
            return false;
        }
        self.route = Route::Details;
        true
    }

    /// Leave the detail view for the tab that opened it
    pub fn back(&mut self) -> bool {
        match self.route {
            Route::Details => {
                self.route = Route::Main(self.tab);
                true
            }
            _ => false,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
