// ============================================================================
// AUTH VIEW - Enlaza index.html con el AuthViewModel
// ============================================================================
// La página ya trae el marcado; aquí solo se buscan los elementos por id,
// se registran los listeners y se pintan los resultados del viewmodel.
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

use crate::config::CONFIG;
use crate::dom::{
    append_child, get_element_by_id, hide, input_value, on_blur, on_change, on_click, on_submit, query_selector,
    require_element, set_class_name, set_disabled, set_text_content, show, toggle_class,
    ElementBuilder,
};
use crate::error::PortalError;
use crate::models::{RegistrationInput, UserType};
use crate::state::Banner;
use crate::utils::validation::{validate_field, Field};
use crate::viewmodels::{AuthViewModel, DashboardInfo, LoginHeader};

const LOGIN_LABEL: &str = "Iniciar Sesión";
const LOADING_LABEL: &str = "Cargando...";
const REGISTER_LABEL: &str = "Registrarse";

/// Inputs del formulario de registro
const REGISTER_FIELDS: [(Field, &str); 6] = [
    (Field::Username, "regUsername"),
    (Field::Password, "regPassword"),
    (Field::ConfirmPassword, "regConfirmPassword"),
    (Field::FullName, "regNombre"),
    (Field::Email, "regCorreo"),
    (Field::Phone, "regTelefono"),
];

fn field_input_id(field: Field) -> &'static str {
    REGISTER_FIELDS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, id)| *id)
        .unwrap_or("regUsername")
}

/// Span de error de un input: `<id>Error`
fn field_error_id(field: Field) -> String {
    format!("{}Error", field_input_id(field))
}

fn read_registration() -> RegistrationInput {
    RegistrationInput {
        username: input_value(field_input_id(Field::Username)),
        password: input_value(field_input_id(Field::Password)),
        confirm_password: input_value(field_input_id(Field::ConfirmPassword)),
        nombre: input_value(field_input_id(Field::FullName)),
        correo: input_value(field_input_id(Field::Email)),
        telefono: input_value(field_input_id(Field::Phone)),
    }
}

/// Elementos de index.html. El registro es opcional: sin `registerForm`
/// la página solo ofrece login.
#[derive(Clone)]
struct AuthElements {
    login_form: Element,
    login_box: Element,
    dashboard: Element,
    message: Element,
    login_btn: Element,
    logout_btn: Element,
    user_type_toggle: Option<Element>,
    register_form: Option<Element>,
    register_btn: Option<Element>,
    show_register: Option<Element>,
    show_login: Option<Element>,
}

impl AuthElements {
    fn lookup() -> Result<Self, JsValue> {
        let login_box = query_selector(".login-box")?
            .ok_or_else(|| JsValue::from_str("No .login-box element found"))?;

        Ok(Self {
            login_form: require_element("loginForm")?,
            login_box,
            dashboard: require_element("dashboard")?,
            message: require_element("message")?,
            login_btn: require_element("loginBtn")?,
            logout_btn: require_element("logoutBtn")?,
            user_type_toggle: get_element_by_id("userTypeToggle"),
            register_form: get_element_by_id("registerForm"),
            register_btn: get_element_by_id("registerBtn"),
            show_register: get_element_by_id("showRegister"),
            show_login: get_element_by_id("showLogin"),
        })
    }

    fn show_banner(&self, banner: &Banner) {
        set_text_content(&self.message, &banner.text);
        set_class_name(&self.message, banner.css_class());
        if let Err(e) = show(&self.message) {
            log::error!("❌ [AUTH] No se pudo mostrar el mensaje: {:?}", e);
        }
    }

    fn hide_banner(&self) {
        let _ = hide(&self.message);
    }

    fn show_error(&self, error: &PortalError) {
        self.show_banner(&Banner::error(error.to_string()));
    }

    fn set_loading(&self, button: &Element, idle_label: &str, loading: bool) -> Result<(), JsValue> {
        if loading {
            let loader = ElementBuilder::new("div")?
                .class("btn-loader")
                .text(LOADING_LABEL)
                .build();
            button.set_inner_html("");
            append_child(button, &loader)?;
        } else {
            set_text_content(button, idle_label);
        }
        set_disabled(button, loading)
    }

    fn show_dashboard(&self, info: &DashboardInfo) -> Result<(), JsValue> {
        if let Some(el) = get_element_by_id("userName") {
            set_text_content(&el, &info.name);
        }
        if let Some(el) = get_element_by_id("userRole") {
            set_text_content(&el, &info.role_line);
        }
        if let Some(el) = get_element_by_id("userType") {
            set_text_content(&el, &info.type_line);
        }
        hide(&self.login_box)?;
        show(&self.dashboard)
    }

    fn show_login_box(&self) -> Result<(), JsValue> {
        hide(&self.dashboard)?;
        show(&self.login_box)
    }

    /// Formulario visible dentro de la caja de login
    fn show_form(&self, register: bool) -> Result<(), JsValue> {
        let Some(register_form) = &self.register_form else {
            return Ok(());
        };
        if register {
            hide(&self.login_form)?;
            show(register_form)?;
        } else {
            hide(register_form)?;
            show(&self.login_form)?;
        }
        self.hide_banner();
        Ok(())
    }

    fn update_header(&self, header: LoginHeader) -> Result<(), JsValue> {
        if let Some(title) = query_selector(".logo h1")? {
            if header.staff {
                let staff = ElementBuilder::new("span")?
                    .attr("style", "color: #dc2626;")?
                    .text("Staff")
                    .build();
                set_text_content(&title, "🎬 ");
                append_child(&title, &staff)?;
                title.append_with_str_1(" CineMax")?;
            } else {
                set_text_content(&title, "🎬 CineMax");
            }
        }
        if let Some(subtitle) = query_selector(".logo p")? {
            set_text_content(&subtitle, header.subtitle);
        }
        Ok(())
    }

    fn set_field_error(&self, field: Field, message: Option<&str>) {
        if let Some(span) = get_element_by_id(&field_error_id(field)) {
            set_text_content(&span, message.unwrap_or(""));
        }
        if let Some(input) = get_element_by_id(field_input_id(field)) {
            let _ = toggle_class(&input, "input-error", message.is_some());
        }
    }

    fn clear_field_errors(&self) {
        for (field, _) in REGISTER_FIELDS {
            self.set_field_error(field, None);
        }
    }
}

fn reset_form(form: &Element) {
    if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
        form.reset();
    }
}

/// Montar la vista de login sobre index.html
pub fn mount(vm: Rc<AuthViewModel>) -> Result<(), JsValue> {
    let els = AuthElements::lookup()?;
    log::info!("🎬 [AUTH] Montando vista de login");

    bind_login(&vm, &els)?;
    bind_logout(&vm, &els)?;
    bind_user_type_toggle(&vm, &els)?;
    bind_registration(&vm, &els)?;

    if vm.init().is_some() {
        if let Some(info) = vm.dashboard_info() {
            els.show_dashboard(&info)?;
        }
    }
    Ok(())
}

fn bind_login(vm: &Rc<AuthViewModel>, els: &AuthElements) -> Result<(), JsValue> {
    let vm = vm.clone();
    let els_clone = els.clone();
    on_submit(&els.login_form, move || {
        let username = input_value("username");
        let password = input_value("password");

        let vm = vm.clone();
        let els = els_clone.clone();
        let _ = els.set_loading(&els.login_btn, LOGIN_LABEL, true);
        els.hide_banner();

        spawn_local(async move {
            match vm.submit_login(&username, &password).await {
                Ok(banner) => {
                    if let Some(info) = vm.dashboard_info() {
                        if let Err(e) = els.show_dashboard(&info) {
                            log::error!("❌ [AUTH] Error mostrando dashboard: {:?}", e);
                        }
                    }
                    els.show_banner(&banner);
                }
                Err(e) => els.show_error(&e),
            }
            let _ = els.set_loading(&els.login_btn, LOGIN_LABEL, false);
        });
    })
}

fn bind_logout(vm: &Rc<AuthViewModel>, els: &AuthElements) -> Result<(), JsValue> {
    let vm = vm.clone();
    let els_clone = els.clone();
    on_click(&els.logout_btn, move |_| {
        vm.logout();
        let els = &els_clone;
        if let Err(e) = els.show_login_box() {
            log::error!("❌ [AUTH] Error volviendo al login: {:?}", e);
        }
        let _ = els.show_form(false);
        els.hide_banner();
        reset_form(&els.login_form);
    })
}

fn bind_user_type_toggle(vm: &Rc<AuthViewModel>, els: &AuthElements) -> Result<(), JsValue> {
    let Some(toggle) = &els.user_type_toggle else {
        return Ok(());
    };
    let vm = vm.clone();
    let els_clone = els.clone();
    on_change(toggle, move |e| {
        let checked = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.checked())
            .unwrap_or(false);
        let header = vm.set_user_type(UserType::from_toggle(checked));
        if let Err(e) = els_clone.update_header(header) {
            log::error!("❌ [AUTH] Error actualizando cabecera: {:?}", e);
        }
    })
}

fn bind_registration(vm: &Rc<AuthViewModel>, els: &AuthElements) -> Result<(), JsValue> {
    let Some(register_form) = els.register_form.clone() else {
        return Ok(());
    };

    if let Some(link) = &els.show_register {
        let vm = vm.clone();
        let els = els.clone();
        on_click(link, move |e| {
            e.prevent_default();
            vm.show_register();
            let _ = els.show_form(true);
        })?;
    }
    if let Some(link) = &els.show_login {
        let vm = vm.clone();
        let els = els.clone();
        on_click(link, move |e| {
            e.prevent_default();
            vm.show_login();
            els.clear_field_errors();
            let _ = els.show_form(false);
        })?;
    }

    // Validación en vivo, campo por campo
    for (field, id) in REGISTER_FIELDS {
        let Some(input) = get_element_by_id(id) else {
            continue;
        };
        let els = els.clone();
        on_blur(&input, move || {
            let result = validate_field(field, &read_registration(), CONFIG.charset_profile);
            els.set_field_error(field, result.as_ref().err().map(|e| e.message.as_str()));
        })?;
    }

    let vm = vm.clone();
    let els = els.clone();
    let form_clone = register_form.clone();
    on_submit(&register_form, move || {
        let input = read_registration();
        let vm = vm.clone();
        let els = els.clone();
        let form = form_clone.clone();

        els.clear_field_errors();
        els.hide_banner();
        if let Some(btn) = &els.register_btn {
            let _ = els.set_loading(btn, REGISTER_LABEL, true);
        }

        spawn_local(async move {
            match vm.submit_register(&input).await {
                Ok(banner) => {
                    els.show_banner(&banner);
                    reset_form(&form);
                    schedule_back_to_login(vm.clone(), els.clone());
                }
                Err(PortalError::Validation(e)) => {
                    els.set_field_error(e.field, Some(e.message.as_str()));
                    els.show_banner(&Banner::error(e.message));
                }
                Err(e) => els.show_error(&e),
            }
            if let Some(btn) = &els.register_btn {
                let _ = els.set_loading(btn, REGISTER_LABEL, false);
            }
        });
    })
}

/// Tras un registro exitoso se vuelve al login pasado un momento
fn schedule_back_to_login(vm: Rc<AuthViewModel>, els: AuthElements) {
    let delay = CONFIG.ui_config.register_redirect_delay_ms;
    Timeout::new(delay, move || {
        vm.show_login();
        // El banner de éxito ya se vio; show_form lo oculta
        let _ = els.show_form(false);
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_span_ids_follow_inputs() {
        assert_eq!(field_error_id(Field::Username), "regUsernameError");
        assert_eq!(field_error_id(Field::ConfirmPassword), "regConfirmPasswordError");
        assert_eq!(field_error_id(Field::Phone), "regTelefonoError");
    }

    #[test]
    fn test_every_field_has_an_input() {
        for field in Field::ALL {
            assert!(REGISTER_FIELDS.iter().any(|(f, _)| *f == field));
        }
    }
}
