use contracts::domain::a001_spare_part::{SparePart, SparePartDto};
use contracts::enums::CriticalityLevel;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_spare_part::api;
use crate::shared::backend::use_backend;
use crate::shared::error::AppError;
use crate::shared::hooks::{use_mutation, MutationOptions};
use crate::system::notifications::use_notifications;

/// Raw text of the form fields
#[derive(Debug, Clone, Default, PartialEq)]
struct PartForm {
    part_number: String,
    name: String,
    category: String,
    manufacturer: String,
    current_stock: String,
    minimum_stock: String,
    maximum_stock: String,
    unit_price: String,
    location: String,
    criticality: String,
}

fn parse_count(label: &str, raw: &str) -> Result<u32, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| AppError::Validation(format!("{label} : nombre entier attendu")))
}

impl PartForm {
    /// Accepts "12,5" as well as "12.5" for the price
    fn to_dto(&self) -> Result<SparePartDto, AppError> {
        let price = self.unit_price.trim().replace(',', ".");
        let unit_price = if price.is_empty() {
            0.0
        } else {
            price
                .parse()
                .map_err(|_| AppError::Validation("Prix unitaire invalide".into()))?
        };
        Ok(SparePartDto {
            part_number: self.part_number.clone(),
            name: self.name.clone(),
            description: String::new(),
            category: self.category.clone(),
            manufacturer: self.manufacturer.clone(),
            current_stock: parse_count("Stock actuel", &self.current_stock)?,
            minimum_stock: parse_count("Stock minimum", &self.minimum_stock)?,
            maximum_stock: parse_count("Stock maximum", &self.maximum_stock)?,
            unit_price,
            location: self.location.clone(),
            criticality: CriticalityLevel::from_code(&self.criticality),
        })
    }
}

#[component]
pub fn CreateSparePartDialog(open: RwSignal<bool>, on_created: Callback<()>) -> impl IntoView {
    let backend = use_backend();
    let notifications = use_notifications();

    let part_number = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let manufacturer = RwSignal::new(String::new());
    let current_stock = RwSignal::new(String::new());
    let minimum_stock = RwSignal::new(String::new());
    let maximum_stock = RwSignal::new(String::new());
    let unit_price = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let criticality = RwSignal::new(CriticalityLevel::Medium.code().to_string());
    let form_error = RwSignal::new(None::<String>);

    let create = use_mutation(
        move |dto: SparePartDto| {
            let backend = backend.clone();
            async move { api::create_spare_part(backend.as_ref(), dto).await }
        },
        MutationOptions::default()
            .on_success(move |part: &SparePart, _| {
                notifications.show_success(
                    "Pièce créée",
                    &format!("{} ({}) a été ajoutée à l'inventaire", part.name, part.part_number),
                );
            })
            .on_error(move |e: &AppError, _| {
                notifications.show_error("Création impossible", &e.user_message());
            }),
    );

    let reset = move || {
        for field in [
            part_number,
            name,
            category,
            manufacturer,
            current_stock,
            minimum_stock,
            maximum_stock,
            unit_price,
            location,
        ] {
            field.set(String::new());
        }
        criticality.set(CriticalityLevel::Medium.code().to_string());
        form_error.set(None);
        create.reset();
    };

    let submit = move |_| {
        let form = PartForm {
            part_number: part_number.get_untracked(),
            name: name.get_untracked(),
            category: category.get_untracked(),
            manufacturer: manufacturer.get_untracked(),
            current_stock: current_stock.get_untracked(),
            minimum_stock: minimum_stock.get_untracked(),
            maximum_stock: maximum_stock.get_untracked(),
            unit_price: unit_price.get_untracked(),
            location: location.get_untracked(),
            criticality: criticality.get_untracked(),
        };
        let dto = match form.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                form_error.set(Some(e.user_message()));
                return;
            }
        };
        form_error.set(None);
        spawn_local(async move {
            if create.mutate(dto).await.is_ok() {
                reset();
                open.set(false);
                on_created.run(());
            }
        });
    };

    let error_text = move || {
        form_error
            .get()
            .or_else(|| create.error().get().map(|e| e.user_message()))
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Nouvelle pièce détachée"</DialogTitle>
                    <DialogContent>
                        <div class="form-grid">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Référence *"</Label>
                                <Input value=part_number placeholder="SKF-6205-2RS" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Désignation *"</Label>
                                <Input value=name />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Catégorie *"</Label>
                                <Input value=category placeholder="Roulements" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Fabricant"</Label>
                                <Input value=manufacturer />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Stock actuel"</Label>
                                <Input value=current_stock placeholder="0" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Stock minimum"</Label>
                                <Input value=minimum_stock placeholder="0" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Stock maximum"</Label>
                                <Input value=maximum_stock placeholder="0" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Prix unitaire (€)"</Label>
                                <Input value=unit_price placeholder="0,00" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Emplacement"</Label>
                                <Input value=location placeholder="A-01-03" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Criticité"</Label>
                                <Select value=criticality>
                                    {CriticalityLevel::all()
                                        .into_iter()
                                        .map(|level| view! {
                                            <option value=level.code()>{level.display_name()}</option>
                                        })
                                        .collect_view()}
                                </Select>
                            </Flex>
                        </div>
                        {move || error_text().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                reset();
                                open.set(false);
                            }
                        >
                            "Annuler"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            loading=create.is_loading()
                        >
                            "Créer"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PartForm {
        PartForm {
            part_number: "SKF-6205".into(),
            name: "Roulement".into(),
            category: "Roulements".into(),
            current_stock: "12".into(),
            minimum_stock: " 5 ".into(),
            unit_price: "12,50".into(),
            criticality: "high".into(),
            ..PartForm::default()
        }
    }

    #[test]
    fn test_form_parses_numbers_and_criticality() {
        let dto = form().to_dto().unwrap();
        assert_eq!(dto.current_stock, 12);
        assert_eq!(dto.minimum_stock, 5);
        assert_eq!(dto.maximum_stock, 0);
        assert_eq!(dto.unit_price, 12.5);
        assert_eq!(dto.criticality, Some(CriticalityLevel::High));
    }

    #[test]
    fn test_bad_numbers_are_validation_errors() {
        let bad_stock = PartForm {
            current_stock: "douze".into(),
            ..form()
        };
        assert!(matches!(bad_stock.to_dto(), Err(AppError::Validation(_))));

        let bad_price = PartForm {
            unit_price: "12€".into(),
            ..form()
        };
        assert!(matches!(bad_price.to_dto(), Err(AppError::Validation(_))));
    }
}
